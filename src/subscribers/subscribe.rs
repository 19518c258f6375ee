use async_trait::async_trait;

use crate::events::Event;

/// Receives the lifecycle events of a built [`Launcher`](crate::Launcher).
///
/// Each subscriber gets its own bounded queue and worker, so a slow `on_event` only
/// delays (and eventually drops) its own events, never the work being launched.
///
/// # Example
/// ```rust
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use async_trait::async_trait;
/// use signalwait::{Event, EventKind, Subscribe};
///
/// /// Sums the run time of launches that failed.
/// #[derive(Default)]
/// struct FailedTime(AtomicU64);
///
/// #[async_trait]
/// impl Subscribe for FailedTime {
///     async fn on_event(&self, ev: &Event) {
///         if ev.kind == EventKind::WorkFailed {
///             let ms = ev.elapsed_ms.unwrap_or(0);
///             self.0.fetch_add(u64::from(ms), Ordering::Relaxed);
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "failed-time"
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event. Events for a single subscriber arrive in emission order.
    async fn on_event(&self, event: &Event);

    /// Name reported in `SubscriberOverflow` and `SubscriberPanicked` events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Events this subscriber may have queued before further ones are dropped.
    fn queue_capacity(&self) -> usize {
        256
    }
}

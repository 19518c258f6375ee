//! # Runtime events emitted while units of work run.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Work lifecycle events**: starting, succeeded, failed, panicked
//! - **Subscriber events**: overflow and panic isolation reports
//!
//! The [`Event`] struct carries additional metadata such as timestamps, work name,
//! launch id, failure reasons and elapsed time.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use signalwait::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::WorkFailed)
//!     .with_work("fetch")
//!     .with_id(7)
//!     .with_reason("connection refused")
//!     .with_elapsed(Duration::from_millis(12));
//!
//! assert_eq!(ev.kind, EventKind::WorkFailed);
//! assert_eq!(ev.work.as_deref(), Some("fetch"));
//! assert_eq!(ev.elapsed_ms, Some(12));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Work lifecycle ===
    /// A unit of work was handed to the runtime and is about to run.
    ///
    /// Sets: `work` (if named), `id`, `at`, `seq`.
    WorkStarting,

    /// The unit of work returned success.
    ///
    /// Sets: `work`, `id`, `elapsed_ms`, `at`, `seq`.
    WorkSucceeded,

    /// The unit of work returned a failure reason.
    ///
    /// Sets: `work`, `id`, `reason`, `elapsed_ms`, `at`, `seq`.
    WorkFailed,

    /// The unit of work panicked and the panic was captured.
    ///
    /// Sets: `work`, `id`, `reason` (panic message), `elapsed_ms`, `at`, `seq`.
    WorkPanicked,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `work` (subscriber name), `reason`, `at`, `seq`.
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `work` (subscriber name), `reason` (panic info), `at`, `seq`.
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name given at launch (or subscriber name for subscriber events).
    pub work: Option<Arc<str>>,
    /// Per-launch identifier, unique within the process.
    pub id: Option<u64>,
    /// Human-readable reason (failure message, panic info, overflow details).
    pub reason: Option<Arc<str>>,
    /// Time from start to completion in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            work: None,
            id: None,
            reason: None,
            elapsed_ms: None,
        }
    }

    /// Attaches a work (or subscriber) name.
    #[inline]
    pub fn with_work(mut self, work: impl Into<Arc<str>>) -> Self {
        self.work = Some(work.into());
        self
    }

    /// Attaches a launch id.
    #[inline]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches elapsed time (stored as milliseconds, saturating).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_work(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_work(subscriber)
            .with_reason(info)
    }

    /// Returns `true` for the terminal work events (succeeded, failed, panicked).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::WorkSucceeded | EventKind::WorkFailed | EventKind::WorkPanicked
        )
    }

    /// Returns `true` for reports about subscriber delivery (overflow, panic) rather than
    /// about a unit of work.
    #[inline]
    pub fn is_subscriber_report(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}

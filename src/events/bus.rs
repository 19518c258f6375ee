//! Broadcast channel that carries lifecycle events out of running work.
//!
//! One [`Bus`] per built launcher. Every run of that launcher holds a clone and emits
//! through it; receivers come from [`Launcher::subscribe`](crate::Launcher::subscribe)
//! and from the subscriber forwarder.
//!
//! Events are only constructed while at least one receiver exists, so a launcher that
//! nobody listens to does no event work at all. A slow receiver lags and skips the
//! oldest events instead of holding up the work that emits them.

use tokio::sync::broadcast;

use super::event::Event;

/// Sending side shared by every run of one launcher.
#[derive(Clone, Debug)]
pub(crate) struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Ring buffer of `capacity` events, at least 1.
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Builds the event with `make` and sends it, unless nobody is listening.
    ///
    /// Never blocks; callable from async tasks and from the blocking pool alike.
    pub(crate) fn emit_with(&self, make: impl FnOnce() -> Event) {
        if self.tx.receiver_count() == 0 {
            return;
        }
        // the last receiver may go away between the check and the send
        let _ = self.tx.send(make());
    }

    /// Receiver for events emitted after this call.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_no_receiver_skips_construction() {
        let bus = Bus::new(8);
        let mut built = false;
        bus.emit_with(|| {
            built = true;
            Event::new(EventKind::WorkStarting)
        });
        assert!(!built);
    }

    #[tokio::test]
    async fn test_receiver_sees_only_later_events() {
        let bus = Bus::new(8);
        bus.emit_with(|| Event::new(EventKind::WorkStarting).with_work("lost"));

        let mut rx = bus.subscribe();
        bus.emit_with(|| Event::new(EventKind::WorkSucceeded).with_work("kept"));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::WorkSucceeded);
        assert_eq!(ev.work.as_deref(), Some("kept"));
    }

    #[test]
    fn test_zero_capacity_holds_one_event() {
        let bus = Bus::new(0);
        let mut rx = bus.subscribe();
        bus.emit_with(|| Event::new(EventKind::WorkFailed));
        assert_eq!(rx.try_recv().unwrap().kind, EventKind::WorkFailed);
    }
}

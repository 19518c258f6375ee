//! # Delivery of launcher events to subscribers.
//!
//! A [`Fanout`] is started by [`LauncherBuilder::build`](crate::LauncherBuilder::build)
//! when subscribers are configured. It reads the launcher's bus and hands each event to
//! one feed per subscriber.
//!
//! ```text
//! Bus ──► forwarder ──┬──► feed "log"     (bounded) ──► on_event()
//!                     └──► feed "metrics" (bounded) ──► on_event()
//! ```
//!
//! The forwarder and every feed are themselves launched units of work, so stopping is
//! "cancel the forwarder, then `all_complete` over the feeds".
//!
//! ## Rules
//! - Per-subscriber FIFO; no ordering between subscribers.
//! - A full feed drops the event for that subscriber only and emits `SubscriberOverflow`.
//! - A panic in `on_event` emits `SubscriberPanicked`; the feed keeps delivering.
//! - Subscriber reports are forwarded like any other event, but a report that overflows
//!   or panics in turn is not reported again.
//! - Stopping delivers what is already on the bus, then lets each feed drain.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

use crate::core::launch;
use crate::error::{panic_message, Outcome};
use crate::events::{Bus, Event};
use crate::signals::{all_complete, Completion, Signal};
use crate::subscribers::Subscribe;

/// Running delivery for one launcher. Clones share the same workers.
#[derive(Clone)]
pub(crate) struct Fanout {
    stop: CancellationToken,
    forwarder: Completion,
}

impl Fanout {
    /// Subscribes to `bus` and starts one feed per subscriber plus the forwarder.
    ///
    /// Must be called inside a Tokio runtime.
    pub(crate) fn start(subscribers: Vec<Arc<dyn Subscribe>>, bus: &Bus) -> Self {
        // subscribe before anything is spawned so no early event is missed
        let rx = bus.subscribe();
        let feeds: Vec<Feed> = subscribers
            .into_iter()
            .map(|sub| Feed::start(sub, bus.clone()))
            .collect();

        let stop = CancellationToken::new();
        let token = stop.clone();
        let bus = bus.clone();
        let forwarder = launch(move || forward(rx, feeds, bus, token));
        Self { stop, forwarder }
    }

    /// Stops forwarding and waits until every feed has drained. Idempotent.
    pub(crate) async fn stop(&self) {
        self.stop.cancel();
        // feeds never fail; an abandoned forwarder only means the runtime is going away
        let _ = self.forwarder.wait().await;
    }
}

/// One subscriber's bounded queue and the launched worker draining it.
struct Feed {
    name: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
    done: Completion,
}

impl Feed {
    fn start(sub: Arc<dyn Subscribe>, bus: Bus) -> Self {
        let name = sub.name();
        let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
        let done = launch(move || deliver(sub, rx, bus));
        Self { name, tx, done }
    }

    /// Queues `ev` without waiting.
    fn offer(&self, ev: &Arc<Event>, bus: &Bus) {
        let reason = match self.tx.try_send(Arc::clone(ev)) {
            Ok(()) => return,
            Err(TrySendError::Full(_)) => "full",
            Err(TrySendError::Closed(_)) => "closed",
        };
        if !ev.is_subscriber_report() {
            bus.emit_with(|| Event::subscriber_overflow(self.name, reason));
        }
    }
}

async fn deliver(
    sub: Arc<dyn Subscribe>,
    mut rx: mpsc::Receiver<Arc<Event>>,
    bus: Bus,
) -> Outcome {
    while let Some(ev) = rx.recv().await {
        let res = AssertUnwindSafe(sub.on_event(&ev)).catch_unwind().await;
        if let (Err(payload), false) = (res, ev.is_subscriber_report()) {
            let info = panic_message(&*payload);
            bus.emit_with(|| Event::subscriber_panicked(sub.name(), info));
        }
    }
    Ok(())
}

async fn forward(
    mut rx: broadcast::Receiver<Event>,
    feeds: Vec<Feed>,
    bus: Bus,
    stop: CancellationToken,
) -> Outcome {
    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            msg = rx.recv() => match msg {
                Ok(ev) => offer_all(&feeds, ev, &bus),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
        }
    }
    while let Ok(ev) = rx.try_recv() {
        offer_all(&feeds, ev, &bus);
    }

    // dropping each sender ends its feed once the queue is empty
    let done: Vec<Completion> = feeds.into_iter().map(|feed| feed.done).collect();
    all_complete(done).wait().await
}

fn offer_all(feeds: &[Feed], ev: Event, bus: &Bus) {
    let ev = Arc::new(ev);
    for feed in feeds {
        feed.offer(&ev, bus);
    }
}

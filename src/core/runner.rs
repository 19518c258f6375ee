//! # Run a single unit of work to completion.
//!
//! Executes one unit of work, emits lifecycle events on the launcher's bus (when it has
//! one) and completes the signal exactly once.
//!
//! ## Event flow
//!
//! ```text
//! Success:
//!   WorkStarting → work() → Ok(())         → WorkSucceeded → complete(Ok)
//!
//! Failure:
//!   WorkStarting → work() → Err(reason)    → WorkFailed    → complete(Err(reason))
//!
//! Panic (catch_panics = true):
//!   WorkStarting → work() → panic captured → WorkPanicked  → complete(Err(Panicked))
//!
//! Panic (catch_panics = false):
//!   WorkStarting → work() → unwinds        → Completer dropped → Err(Abandoned)
//! ```
//!
//! ## Rules
//! - The terminal event is published **before** the signal completes.
//! - The failure reason is passed through untouched; only its `Display` goes into the event.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;

use crate::error::{Failure, Outcome, WorkError};
use crate::events::{Bus, Event, EventKind};
use crate::signals::Completer;

/// Process-wide launch counter.
static LAUNCH_ID: AtomicU64 = AtomicU64::new(1);

/// Bookkeeping for one launch.
pub(crate) struct Run {
    id: u64,
    name: Option<Arc<str>>,
    bus: Option<Bus>,
    catch_panics: bool,
    started: Instant,
}

impl Run {
    pub(crate) fn new(name: Option<Arc<str>>, bus: Option<Bus>, catch_panics: bool) -> Self {
        Self {
            id: LAUNCH_ID.fetch_add(1, AtomicOrdering::Relaxed),
            name,
            bus,
            catch_panics,
            started: Instant::now(),
        }
    }

    /// Runs async work on the current task and completes `completer` with its outcome.
    pub(crate) async fn drive<Fut>(mut self, work: Fut, completer: Completer)
    where
        Fut: Future<Output = Outcome>,
    {
        self.begin();
        let res = if self.catch_panics {
            AssertUnwindSafe(work).catch_unwind().await
        } else {
            Ok(work.await)
        };
        completer.complete(self.finish(res));
    }

    /// Runs blocking work on the current thread and completes `completer` with its outcome.
    pub(crate) fn drive_blocking<F>(mut self, work: F, completer: Completer)
    where
        F: FnOnce() -> Outcome,
    {
        self.begin();
        let res = if self.catch_panics {
            std::panic::catch_unwind(AssertUnwindSafe(work))
        } else {
            Ok(work())
        };
        completer.complete(self.finish(res));
    }

    fn begin(&mut self) {
        self.started = Instant::now();
        self.publish(EventKind::WorkStarting, |ev| ev);
    }

    /// Maps the raw result to an outcome and publishes the terminal event.
    fn finish(self, res: Result<Outcome, Box<dyn Any + Send>>) -> Outcome {
        let elapsed = self.started.elapsed();
        match res {
            Ok(Ok(())) => {
                self.publish(EventKind::WorkSucceeded, |ev| ev.with_elapsed(elapsed));
                Ok(())
            }
            Ok(Err(failure)) => {
                self.publish(EventKind::WorkFailed, |ev| {
                    ev.with_reason(failure.to_string()).with_elapsed(elapsed)
                });
                Err(failure)
            }
            Err(payload) => {
                let err = WorkError::from_panic(&*payload);
                self.publish(EventKind::WorkPanicked, |ev| {
                    ev.with_reason(err.as_message()).with_elapsed(elapsed)
                });
                Err(Failure::new(err))
            }
        }
    }

    fn event(&self, kind: EventKind) -> Event {
        let ev = Event::new(kind).with_id(self.id);
        match &self.name {
            Some(name) => ev.with_work(Arc::clone(name)),
            None => ev,
        }
    }

    /// The event is only built when the bus has a listener.
    fn publish(&self, kind: EventKind, fill: impl FnOnce(Event) -> Event) {
        if let Some(bus) = &self.bus {
            bus.emit_with(|| fill(self.event(kind)));
        }
    }
}

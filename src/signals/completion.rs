//! # Launched signal and its producer half.
//!
//! [`channel`] creates a connected pair: a [`Completer`] (exactly one producer) and a
//! [`Completion`] (cloneable, any number of observers). The pair is backed by a
//! [`tokio::sync::watch`] slot holding `Option<Outcome>`.
//!
//! ## State machine
//! ```text
//! Pending (None) ──complete(outcome)──► Completed(Some(outcome))
//!        │
//!        └──── Completer dropped ────► Completed(Some(Err(WorkError::Abandoned)))
//! ```
//!
//! ## Rules
//! - The slot is written once; `complete` consumes the completer, so there is no second write.
//! - Observers never consume the value: `wait` borrows and clones it.
//! - A dropped completer still completes the signal, so no observer waits forever.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::{Failure, Outcome, WorkError};
use crate::signals::signal::{Signal, SignalRef};

/// Creates a pending signal together with the handle that completes it.
///
/// # Example
/// ```
/// use signalwait::{channel, Signal};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (completer, completion) = channel();
/// assert!(!completion.is_complete());
///
/// completer.complete(Ok(()));
/// assert!(completion.wait().await.is_ok());
/// # }
/// ```
pub fn channel() -> (Completer, Completion) {
    let (tx, rx) = watch::channel(None);
    (Completer { tx: Some(tx) }, Completion { rx })
}

/// Producer half of a [`Completion`].
#[derive(Debug)]
pub struct Completer {
    tx: Option<watch::Sender<Option<Outcome>>>,
}

impl Completer {
    /// Completes the signal with `outcome`, waking every observer.
    pub fn complete(mut self, outcome: Outcome) {
        if let Some(tx) = self.tx.take() {
            tx.send_replace(Some(outcome));
        }
    }
}

impl Drop for Completer {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tx.send_replace(Some(Err(Failure::new(WorkError::Abandoned))));
        }
    }
}

/// Signal for one launched unit of work.
///
/// Cheap to clone; every clone observes the same completion.
#[derive(Clone, Debug)]
pub struct Completion {
    rx: watch::Receiver<Option<Outcome>>,
}

impl Completion {
    /// Returns `true` once the outcome is available. Never suspends.
    pub fn is_complete(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Returns the outcome if already available. Never suspends.
    pub fn try_outcome(&self) -> Option<Outcome> {
        self.rx.borrow().clone()
    }
}

#[async_trait]
impl Signal for Completion {
    async fn wait(&self) -> Outcome {
        let mut rx = self.rx.clone();
        let seen = match rx.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        // Completer writes before its sender closes; an empty slot is unreachable in practice.
        seen.unwrap_or_else(|| Err(Failure::new(WorkError::Abandoned)))
    }
}

impl From<Completion> for SignalRef {
    fn from(signal: Completion) -> Self {
        std::sync::Arc::new(signal)
    }
}

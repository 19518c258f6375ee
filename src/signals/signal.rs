//! # Signal abstraction.
//!
//! A [`Signal`] represents the eventual completion of one unit of work (or of a group of
//! them). Its only operation is [`wait`](Signal::wait), which suspends until completion and
//! returns the [`Outcome`].
//!
//! ## Rules
//! - `wait` may be called any number of times, from any number of tasks, before or after completion.
//! - Once complete, every call returns the same outcome (same failure value, see [`Failure::ptr_eq`](crate::Failure::ptr_eq)).
//! - Returning from `wait` happens-after everything the unit of work did before it returned.
//!
//! The common handle type is [`SignalRef`], an `Arc<dyn Signal>` suitable for sharing and for
//! feeding the merge combinators.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::Outcome;

/// Shared handle to a signal.
pub type SignalRef = Arc<dyn Signal>;

/// # Completion of an asynchronous operation.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use signalwait::{Outcome, Signal};
///
/// /// A signal that is complete from the start.
/// struct Ready;
///
/// #[async_trait]
/// impl Signal for Ready {
///     async fn wait(&self) -> Outcome {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Signal: Send + Sync + 'static {
    /// Suspends until the underlying operation completes, then returns its outcome.
    ///
    /// Returns immediately if the operation already completed.
    async fn wait(&self) -> Outcome;
}

/// Convenience methods for every [`Signal`].
pub trait SignalExt: Signal {
    /// Blocks the current OS thread until the signal completes.
    ///
    /// Meant for plain threads outside the runtime (e.g. `std::thread::spawn` or
    /// `spawn_blocking` bodies). Calling it from inside an async task stalls that
    /// worker thread and can deadlock a current-thread runtime.
    fn wait_blocking(&self) -> Outcome {
        futures::executor::block_on(self.wait())
    }
}

impl<S: Signal + ?Sized> SignalExt for S {}

/// Spawns one observer of `signal` and returns a channel that receives its outcome once.
///
/// Useful for polling completion without suspending: `try_recv()` reports `Empty` until
/// the signal completes.
///
/// # Panics
/// Must be called inside a Tokio runtime.
pub fn observe(signal: impl Into<SignalRef>) -> oneshot::Receiver<Outcome> {
    let signal = signal.into();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(signal.wait().await);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::channel;
    use crate::Failure;
    use std::time::Duration;
    use tokio::sync::oneshot::error::TryRecvError;

    #[tokio::test]
    async fn test_observe_empty_until_complete() {
        let (completer, completion) = channel();
        let mut rx = observe(completion);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        let reason = Failure::msg("late");
        completer.complete(Err(reason.clone()));
        let got = rx.await.unwrap().unwrap_err();
        assert!(Failure::ptr_eq(&got, &reason));
    }

    #[tokio::test]
    async fn test_shared_handles_see_same_outcome() {
        let (completer, completion) = channel();
        let shared: SignalRef = Arc::new(completion);
        let again = Arc::clone(&shared);
        completer.complete(Err(Failure::msg("once")));
        let a = shared.wait().await.unwrap_err();
        let b = again.wait().await.unwrap_err();
        assert!(Failure::ptr_eq(&a, &b));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_wait_blocking_from_plain_thread() {
        let (completer, completion) = channel();
        let waiter = std::thread::spawn(move || completion.wait_blocking());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        completer.complete(Err(Failure::msg("from thread")));
        let outcome = tokio::task::spawn_blocking(move || waiter.join().unwrap())
            .await
            .unwrap();
        assert_eq!(outcome.unwrap_err().to_string(), "from thread");
    }
}

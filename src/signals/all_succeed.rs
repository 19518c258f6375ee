//! # Wait for every input to succeed, fail fast otherwise.
//!
//! [`AllSucceed`] is the `errgroup` shape. Inputs are observed concurrently so a fast
//! failure is reported without waiting behind slower successful inputs.
//!
//! ## Fan-in
//! ```text
//! input 1 .wait() ──┐
//! input 2 .wait() ──┼──► FuturesUnordered ──► first Err, or Ok once drained
//! input N .wait() ──┘
//! ```
//!
//! ## Rules
//! - Which failure is reported when several inputs fail is whichever resolves first.
//! - Nothing is spawned: the waits are polled by whoever awaits the composite, on any
//!   executor. Inputs still pending after a failure are simply no longer observed.
//! - The derived outcome is memoised, so every caller of `wait` sees the same failure value.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::OnceCell;

use crate::error::Outcome;
use crate::signals::signal::{Signal, SignalRef};

/// Composite signal that succeeds only if every input succeeds.
pub struct AllSucceed {
    signals: Vec<SignalRef>,
    outcome: OnceCell<Outcome>,
}

/// Merges `signals` into one signal that succeeds when all succeed and fails on the first
/// observed failure.
///
/// With no inputs the result completes immediately as success. Construction needs no
/// runtime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use signalwait::{all_succeed, launch, Failure, Signal};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let slow = launch(|| async {
///     tokio::time::sleep(Duration::from_secs(5)).await;
///     Ok::<_, Failure>(())
/// });
/// let fast = launch(|| async { Err::<(), _>(Failure::msg("fast failure")) });
///
/// let err = all_succeed([slow, fast]).wait().await.unwrap_err();
/// assert_eq!(err.to_string(), "fast failure");
/// # }
/// ```
pub fn all_succeed<I>(signals: I) -> AllSucceed
where
    I: IntoIterator,
    I::Item: Into<SignalRef>,
{
    AllSucceed {
        signals: signals.into_iter().map(Into::into).collect(),
        outcome: OnceCell::new(),
    }
}

impl AllSucceed {
    /// Number of inputs captured at construction.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns `true` when there are no inputs, in which case `wait` succeeds at once.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Polls every input concurrently until the first failure or the last success.
    async fn collect(&self) -> Outcome {
        let mut pending: FuturesUnordered<_> =
            self.signals.iter().map(|signal| signal.wait()).collect();
        while let Some(outcome) = pending.next().await {
            outcome?;
        }
        Ok(())
    }
}

#[async_trait]
impl Signal for AllSucceed {
    async fn wait(&self) -> Outcome {
        self.outcome.get_or_init(|| self.collect()).await.clone()
    }
}

impl From<AllSucceed> for SignalRef {
    fn from(signal: AllSucceed) -> Self {
        Arc::new(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Failure;
    use crate::signals::{all_complete, channel, observe, Completer, SignalExt};
    use futures::FutureExt;
    use rand::seq::SliceRandom;
    use rand::Rng;
    use std::time::Duration;
    use tokio::sync::oneshot::error::TryRecvError;
    use tokio::time::{timeout, Instant};

    fn pending(n: usize) -> (Vec<Completer>, Vec<SignalRef>) {
        (0..n).map(|_| channel()).map(|(c, s)| (c, s.into())).unzip()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_empty_completes_immediately() {
        let merged = all_succeed(Vec::<SignalRef>::new());
        assert!(merged.is_empty());
        assert!(matches!(merged.wait().now_or_never(), Some(Ok(()))));
    }

    #[tokio::test]
    async fn test_completed_inputs_resolve_without_suspending() {
        let (completers, signals) = pending(3);
        for c in completers {
            c.complete(Ok(()));
        }
        let merged = all_succeed(signals);
        assert_eq!(merged.len(), 3);
        assert!(matches!(merged.wait().now_or_never(), Some(Ok(()))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_waits_until_all_succeed() {
        let mut rng = rand::rng();
        for n in 0..=10 {
            let (mut completers, signals) = pending(n);
            let mut rx = observe(all_succeed(signals));

            completers.shuffle(&mut rng);
            let total = completers.len();
            for (i, completer) in completers.into_iter().enumerate() {
                completer.complete(Ok(()));
                if i + 1 < total {
                    settle().await;
                    assert!(
                        matches!(rx.try_recv(), Err(TryRecvError::Empty)),
                        "n={n}: completed after {} of {total}",
                        i + 1
                    );
                }
            }
            assert!(rx.await.unwrap().is_ok(), "n={n}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_one_failure_is_reported_by_identity() {
        let mut rng = rand::rng();
        for n in 1..=10 {
            let fixed = Failure::msg("!");
            let fail_at = rng.random_range(0..n);

            let (mut completers, signals) = pending(n);
            let mut rx = observe(all_succeed(signals));
            completers.shuffle(&mut rng);

            let mut failed = false;
            for (i, completer) in completers.into_iter().enumerate() {
                if i == fail_at {
                    failed = true;
                    completer.complete(Err(fixed.clone()));
                } else {
                    completer.complete(Ok(()));
                }
                if !failed && i + 1 < n {
                    settle().await;
                    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)), "n={n}");
                }
            }
            let got = rx.await.unwrap().unwrap_err();
            assert!(Failure::ptr_eq(&got, &fixed), "n={n}");
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_wait_for_pending_sibling() {
        let (slow, slow_signal) = channel();
        let (fast, fast_signal) = channel();
        let merged = all_succeed([slow_signal, fast_signal]);

        let reason = Failure::msg("fast");
        fast.complete(Err(reason.clone()));

        let got = timeout(Duration::from_secs(1), merged.wait())
            .await
            .expect("must not wait for the pending sibling")
            .unwrap_err();
        assert!(Failure::ptr_eq(&got, &reason));
        drop(slow);
    }

    #[tokio::test]
    async fn test_failure_behind_slow_success_in_order() {
        let (slow, slow_signal) = channel();
        let (fast, fast_signal) = channel();
        let merged = all_succeed([slow_signal, fast_signal]);

        let started = Instant::now();
        let keep_slow = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            slow.complete(Ok(()));
        });
        fast.complete(Err(Failure::msg("first")));

        assert!(merged.wait().await.is_err());
        assert!(started.elapsed() < Duration::from_secs(1));
        keep_slow.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_memoised_outcome_is_identical() {
        let (completers, signals) = pending(4);
        let merged = Arc::new(all_succeed(signals));
        for c in completers {
            c.complete(Err(Failure::msg("each distinct")));
        }

        let first = merged.wait().await.unwrap_err();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&merged);
                tokio::spawn(async move { m.wait().await })
            })
            .collect();
        for h in handles {
            let got = h.await.unwrap().unwrap_err();
            assert!(Failure::ptr_eq(&got, &first));
        }
    }

    #[tokio::test]
    async fn test_nested_composites() {
        let (completers, signals) = pending(3);
        let mut signals = signals.into_iter();
        let inner = all_complete([signals.next().unwrap(), signals.next().unwrap()]);
        let outer = all_succeed([SignalRef::from(inner), signals.next().unwrap()]);

        let mut completers = completers.into_iter();
        // failure swallowed by the inner all_complete
        completers.next().unwrap().complete(Err(Failure::msg("hidden")));
        completers.next().unwrap().complete(Ok(()));
        completers.next().unwrap().complete(Ok(()));

        assert!(outer.wait().await.is_ok());
    }

    #[test]
    fn test_built_and_waited_outside_runtime() {
        let empty = all_succeed(Vec::<SignalRef>::new());
        assert!(empty.wait_blocking().is_ok());

        let (ok, ok_signal) = channel();
        let (bad, bad_signal) = channel();
        let merged = all_succeed([ok_signal, bad_signal]);

        let producer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            bad.complete(Err(Failure::msg("seen from outside")));
            ok.complete(Ok(()));
        });
        let err = merged.wait_blocking().unwrap_err();
        assert_eq!(err.to_string(), "seen from outside");
        producer.join().unwrap();
    }
}

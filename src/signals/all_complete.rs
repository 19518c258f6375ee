//! # Wait for every input to finish.
//!
//! [`AllComplete`] is the `WaitGroup` shape: it answers "is everyone done", not "did
//! everyone succeed". Individual failures are discarded; inspect the inputs afterwards
//! if they matter, or use [`AllSucceed`](crate::AllSucceed).
//!
//! Inputs are awaited one after another in the given order. Each input is already
//! running on its own, so the total wait is the slowest input, not the sum.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Outcome;
use crate::signals::signal::{Signal, SignalRef};

/// Composite signal that completes once all inputs complete. Always succeeds.
pub struct AllComplete {
    signals: Vec<SignalRef>,
}

/// Merges `signals` into one signal that completes after all of them, regardless of outcome.
///
/// With no inputs the result completes immediately.
///
/// # Example
/// ```
/// use signalwait::{all_complete, launch, Failure, Signal};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ok = launch(|| async { Ok::<_, Failure>(()) });
/// let bad = launch(|| async { Err::<(), _>(Failure::msg("ignored")) });
///
/// assert!(all_complete([ok, bad]).wait().await.is_ok());
/// # }
/// ```
pub fn all_complete<I>(signals: I) -> AllComplete
where
    I: IntoIterator,
    I::Item: Into<SignalRef>,
{
    AllComplete {
        signals: signals.into_iter().map(Into::into).collect(),
    }
}

impl AllComplete {
    /// Number of inputs captured at construction.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns `true` when there are no inputs, in which case `wait` succeeds at once.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[async_trait]
impl Signal for AllComplete {
    async fn wait(&self) -> Outcome {
        for signal in &self.signals {
            let _ = signal.wait().await;
        }
        Ok(())
    }
}

impl From<AllComplete> for SignalRef {
    fn from(signal: AllComplete) -> Self {
        Arc::new(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{channel, observe, Completer};
    use crate::Failure;
    use futures::FutureExt;
    use rand::seq::SliceRandom;
    use std::time::Duration;
    use tokio::sync::oneshot::error::TryRecvError;

    fn pending(n: usize) -> (Vec<Completer>, Vec<SignalRef>) {
        (0..n).map(|_| channel()).map(|(c, s)| (c, s.into())).unzip()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_empty_completes_immediately() {
        let merged = all_complete(Vec::<SignalRef>::new());
        assert!(merged.is_empty());
        assert!(matches!(merged.wait().now_or_never(), Some(Ok(()))));
    }

    #[tokio::test]
    async fn test_waits_for_all_in_any_order() {
        let mut rng = rand::rng();
        for n in 0..=10 {
            let (mut completers, signals) = pending(n);
            let mut rx = observe(all_complete(signals));

            completers.shuffle(&mut rng);
            let total = completers.len();
            for (i, completer) in completers.into_iter().enumerate() {
                let outcome = if i % 2 == 0 {
                    Err(Failure::msg("!"))
                } else {
                    Ok(())
                };
                completer.complete(outcome);

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

    #[tokio::test]
    async fn test_failures_are_discarded() {
        let (completers, signals) = pending(3);
        let merged = all_complete(signals);
        for c in completers {
            c.complete(Err(Failure::msg("boom")));
        }
        assert!(merged.wait().await.is_ok());
        assert!(merged.wait().await.is_ok());
    }
}

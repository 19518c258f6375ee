//! # signalwait
//!
//! **signalwait** turns "run this concurrently and tell me when it is done" into a value.
//!
//! [`launch`] starts a unit of work on Tokio and immediately returns a [`Completion`]: a
//! [`Signal`] whose [`wait`](Signal::wait) suspends until the work returns and yields its
//! [`Outcome`] (success, or failure with an opaque [`Failure`] reason). No channel plumbing
//! per task. Signals merge:
//!
//! - [`all_complete`] waits until every input is done, regardless of outcome (a wait group).
//! - [`all_succeed`] waits until every input succeeds and fails fast on the first failure
//!   (an error group).
//!
//! ## Architecture
//! ```text
//!   launch(work) ─────────────► tokio::spawn ──► Run ──► work().await
//!        │                                        │
//!        │ returns immediately                    ├─► bus (optional) ──► subscriber feeds
//!        ▼                                        ▼
//!   Completion ◄──────── watch slot ◄──── Completer::complete(outcome)
//!        │
//!        ├─────────────┬──────────────────┐
//!        ▼             ▼                  ▼
//!   all_complete   all_succeed        wait() / wait_blocking() / observe()
//!  (sequential)  (inputs polled together,
//!                 first Err wins)
//! ```
//!
//! ## Guarantees
//! - Each launch runs its work exactly once; `wait` never runs it again.
//! - `wait` is idempotent and safe from any number of concurrent observers; all of them see
//!   the same outcome, and the same failure value ([`Failure::ptr_eq`]).
//! - Returning from `wait` happens-after everything the work did before it returned, so
//!   results can be handed over through shared state.
//! - No cancellation, timeouts or retries: the work decides its own outcome. A unit of work
//!   may watch an external cancellation token and fail with whatever reason it likes.
//!
//! ## Features
//! | Area              | Description                                                   | Key types / functions                          |
//! |-------------------|---------------------------------------------------------------|------------------------------------------------|
//! | **Launch**        | Start async or blocking work, get a signal.                   | [`launch`], [`launch_blocking`], [`Launcher`]  |
//! | **Signals**       | Await completion, peek, block a plain thread.                 | [`Signal`], [`SignalExt`], [`Completion`]      |
//! | **Merge**         | Wait-group and error-group composition.                       | [`all_complete`], [`all_succeed`]              |
//! | **Manual**        | Complete a signal by hand.                                    | [`channel`], [`Completer`]                     |
//! | **Errors**        | Identity-preserving failure reasons.                          | [`Failure`], [`WorkError`]                     |
//! | **Events**        | Lifecycle events for logging/metrics.                         | [`Event`], [`Subscribe`], [`LauncherBuilder`]  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use signalwait::{all_succeed, launch, Failure, Signal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let results = Arc::new(Mutex::new(Vec::new()));
//!
//!     let signals: Vec<_> = ["web", "image", "video"]
//!         .into_iter()
//!         .map(|kind| {
//!             let results = Arc::clone(&results);
//!             launch(move || async move {
//!                 results.lock().unwrap().push(format!("{kind} result"));
//!                 Ok::<_, Failure>(())
//!             })
//!         })
//!         .collect();
//!
//!     all_succeed(signals).wait().await?;
//!     assert_eq!(results.lock().unwrap().len(), 3);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod signals;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{launch, launch_blocking, Config, Launcher, LauncherBuilder};
pub use error::{Failure, Outcome, WorkError};
pub use events::{Event, EventKind};
pub use signals::{
    all_complete, all_succeed, channel, observe, AllComplete, AllSucceed, Completer, Completion,
    Signal, SignalExt, SignalRef,
};
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

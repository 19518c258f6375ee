//! Runtime core: launching units of work.
//!
//! The public API from this module is [`Launcher`] (plus its builder and [`Config`]) and the
//! free functions [`launch`] / [`launch_blocking`], which use a silent default launcher.
//!
//! Internal modules:
//! - [`runner`]: executes one unit of work, captures panics, publishes events, completes the signal;
//! - [`launcher`]: spawns runners onto Tokio and hands back [`Completion`](crate::Completion)s;
//! - [`builder`]: wires the event bus and subscribers;
//! - [`config`]: launcher settings.
//!
//! ```text
//! launch(work) ──► tokio::spawn(runner) ──► Completion (returned immediately)
//!                        │
//!                        ├─► publish WorkStarting
//!                        ├─► work().await   (panic captured if configured)
//!                        ├─► publish WorkSucceeded | WorkFailed | WorkPanicked
//!                        └─► Completer::complete(outcome)
//! ```

mod builder;
mod config;
mod launcher;
mod runner;

pub use builder::LauncherBuilder;
pub use config::Config;
pub use launcher::{launch, launch_blocking, Launcher};

//! # Signals and merge combinators.
//!
//! - [`Signal`] - trait for anything whose completion can be awaited
//! - [`Completion`] / [`Completer`] - the launched signal and its producer half
//! - [`AllComplete`] - "is everyone done" (failures discarded)
//! - [`AllSucceed`] - "did everyone succeed" (fails fast)
//!
//! ## Shapes
//! ```text
//! Completer ──complete()──► watch slot ──► Completion::wait() (any number of observers)
//!
//! all_complete([a, b, c])  : a.wait() → b.wait() → c.wait() → Ok(())
//!
//! all_succeed([a, b, c])   : a.wait() | b.wait() | c.wait() polled together
//!                            first Err or last Ok wins; nothing is spawned
//! ```

mod all_complete;
mod all_succeed;
mod completion;
mod signal;

pub use all_complete::{all_complete, AllComplete};
pub use all_succeed::{all_succeed, AllSucceed};
pub use completion::{channel, Completer, Completion};
pub use signal::{observe, Signal, SignalExt, SignalRef};

//! # Event subscribers.
//!
//! A launcher built with [`LauncherBuilder::with_subscribers`](crate::LauncherBuilder::with_subscribers)
//! delivers every [`Event`](crate::Event) it emits to each [`Subscribe`] implementation.
//!
//! - [`Subscribe`]: the handler trait
//! - `Fanout`: per-subscriber feeds, started by the builder and stopped by
//!   [`Launcher::shutdown`](crate::Launcher::shutdown)
//! - `LogWriter` (feature `logging`): stdout printer

mod fanout;
#[cfg(feature = "logging")]
mod log;
mod subscribe;

pub(crate) use fanout::Fanout;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;

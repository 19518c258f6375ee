//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [starting] work="fetch" id=3
//! [failed] work="fetch" id=3 err="connection refused" elapsed_ms=12
//! [succeeded] work="index" id=4 elapsed_ms=40
//! [panicked] work="parse" id=5 info="index out of bounds"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let work = e.work.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::WorkStarting => {
                println!("[starting] work={work:?} id={:?}", e.id);
            }
            EventKind::WorkSucceeded => {
                println!(
                    "[succeeded] work={work:?} id={:?} elapsed_ms={:?}",
                    e.id, e.elapsed_ms
                );
            }
            EventKind::WorkFailed => {
                println!(
                    "[failed] work={work:?} id={:?} err={:?} elapsed_ms={:?}",
                    e.id, e.reason, e.elapsed_ms
                );
            }
            EventKind::WorkPanicked => {
                println!(
                    "[panicked] work={work:?} id={:?} info={:?}",
                    e.id, e.reason
                );
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] subscriber={work} reason={:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={work} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

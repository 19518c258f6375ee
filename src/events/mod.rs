//! Lifecycle events published while units of work run.
//!
//! - [`EventKind`], [`Event`]: what happened to which launch, and when.
//! - `Bus`: the launcher-private broadcast channel the runs emit into.
//!
//! Each launch emits one `WorkStarting` and exactly one terminal event. Subscriber
//! delivery adds `SubscriberOverflow` and `SubscriberPanicked` reports to the same bus.

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};

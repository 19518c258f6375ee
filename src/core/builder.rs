use std::sync::Arc;

use crate::core::config::Config;
use crate::core::launcher::Launcher;
use crate::events::Bus;
use crate::subscribers::{Fanout, Subscribe};

/// Builder for a [`Launcher`] that emits events.
pub struct LauncherBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl LauncherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets the subscribers that receive every event the launcher emits.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the launcher.
    ///
    /// With subscribers present this starts their delivery workers, so it must run inside
    /// a Tokio runtime. Without subscribers events are only visible through
    /// [`Launcher::subscribe`].
    pub fn build(self) -> Launcher {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let fanout = if self.subscribers.is_empty() {
            None
        } else {
            Some(Fanout::start(self.subscribers, &bus))
        };
        Launcher::from_parts(self.cfg, bus, fanout)
    }
}

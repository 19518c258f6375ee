//! # Launcher: start work, get a signal.
//!
//! [`Launcher`] spawns each unit of work onto Tokio and immediately returns a
//! [`Completion`] for it. A launcher built through [`Launcher::builder`] also publishes
//! lifecycle [`Event`]s; a plain [`Launcher::new`] (and the free [`launch`] /
//! [`launch_blocking`] functions) stays silent.
//!
//! ## Rules
//! - Exactly one concurrent execution per call; the caller never blocks.
//! - A failing unit of work is a normal failed outcome, never an error of the launcher.
//! - The unit of work's error converts into a [`Failure`] once and is shared from there on.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::core::builder::LauncherBuilder;
use crate::core::config::Config;
use crate::core::runner::Run;
use crate::error::Failure;
use crate::events::{Bus, Event};
use crate::signals::{channel, Completion};
use crate::subscribers::Fanout;

/// Starts `work` on the current Tokio runtime and returns its completion signal.
///
/// `work` is called on the spawned task, not on the caller.
///
/// # Panics
/// Must be called inside a Tokio runtime.
///
/// # Example
/// ```
/// use signalwait::{launch, Failure, Signal};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let signal = launch(|| async {
///     // do work...
///     Ok::<_, Failure>(())
/// });
/// assert!(signal.wait().await.is_ok());
/// # }
/// ```
pub fn launch<F, Fut, E>(work: F) -> Completion
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Into<Failure> + 'static,
{
    Launcher::default().launch(work)
}

/// Starts a blocking closure on Tokio's blocking pool and returns its completion signal.
///
/// # Panics
/// Must be called inside a Tokio runtime.
pub fn launch_blocking<F, E>(work: F) -> Completion
where
    F: FnOnce() -> Result<(), E> + Send + 'static,
    E: Into<Failure> + 'static,
{
    Launcher::default().launch_blocking(work)
}

/// Handle for launching units of work.
///
/// Cheap to clone; clones share configuration, bus and subscriber delivery.
#[derive(Clone)]
pub struct Launcher {
    cfg: Config,
    bus: Option<Bus>,
    fanout: Option<Fanout>,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Launcher {
    /// Creates a silent launcher (no event bus).
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            bus: None,
            fanout: None,
        }
    }

    /// Returns a builder that wires an event bus and subscribers.
    pub fn builder(cfg: Config) -> LauncherBuilder {
        LauncherBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: Config, bus: Bus, fanout: Option<Fanout>) -> Self {
        Self {
            cfg,
            bus: Some(bus),
            fanout,
        }
    }

    /// Returns the configuration this launcher was created with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Starts anonymous async work. See [`launch`].
    pub fn launch<F, Fut, E>(&self, work: F) -> Completion
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        self.spawn(None, work)
    }

    /// Starts async work whose events carry `name`.
    pub fn launch_named<F, Fut, E>(
        &self,
        name: impl Into<Cow<'static, str>>,
        work: F,
    ) -> Completion
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        self.spawn(Some(name.into()), work)
    }

    /// Starts an anonymous blocking closure. See [`launch_blocking`].
    pub fn launch_blocking<F, E>(&self, work: F) -> Completion
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        self.spawn_blocking(None, work)
    }

    /// Starts a blocking closure whose events carry `name`.
    pub fn launch_blocking_named<F, E>(
        &self,
        name: impl Into<Cow<'static, str>>,
        work: F,
    ) -> Completion
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        self.spawn_blocking(Some(name.into()), work)
    }

    /// Returns a receiver for events published after this call, or `None` for a silent launcher.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<Event>> {
        self.bus.as_ref().map(Bus::subscribe)
    }

    /// Stops subscriber delivery and waits for subscribers to drain.
    ///
    /// Events emitted before the call are still delivered. Work already launched keeps
    /// running and its signals still complete; only event delivery stops. Idempotent.
    pub async fn shutdown(&self) {
        if let Some(fanout) = &self.fanout {
            fanout.stop().await;
        }
    }

    fn run(&self, name: Option<Cow<'static, str>>) -> Run {
        Run::new(
            name.map(Arc::<str>::from),
            self.bus.clone(),
            self.cfg.catch_panics,
        )
    }

    fn spawn<F, Fut, E>(&self, name: Option<Cow<'static, str>>, work: F) -> Completion
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        let (completer, completion) = channel();
        let run = self.run(name);
        tokio::spawn(async move {
            let work = async move { work().await.map_err(Into::<Failure>::into) };
            run.drive(work, completer).await;
        });
        completion
    }

    fn spawn_blocking<F, E>(&self, name: Option<Cow<'static, str>>, work: F) -> Completion
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        let (completer, completion) = channel();
        let run = self.run(name);
        tokio::task::spawn_blocking(move || {
            run.drive_blocking(move || work().map_err(Into::<Failure>::into), completer);
        });
        completion
    }
}

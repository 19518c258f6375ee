//! Failure reasons carried by signal outcomes.
//!
//! This module defines:
//!
//! - [`Failure`]: the opaque, identity-preserving reason attached to a failed [`Outcome`].
//! - [`WorkError`]: failures the runtime itself attaches when a unit of work produced no outcome.
//!
//! A unit of work's own error is never wrapped or rewritten: it is stored once behind an
//! `Arc` and every observer receives a handle to that same allocation.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Result of a completed unit of work: success, or failure with a [`Failure`] reason.
pub type Outcome = Result<(), Failure>;

/// # Opaque failure reason.
///
/// Cloning a `Failure` clones a reference, not the error: every observer of a signal
/// gets the *same* error value the unit of work returned. Use [`Failure::ptr_eq`] to
/// check identity and [`Failure::downcast_ref`] to recover the concrete type.
///
/// `Failure` deliberately does not implement [`std::error::Error`] itself, which keeps
/// the blanket `From<E: Error>` conversion coherent. It converts into
/// `Box<dyn Error + Send + Sync>` for use with `?`.
///
/// # Example
/// ```
/// use signalwait::Failure;
///
/// let a = Failure::msg("boom");
/// let b = a.clone();
/// assert!(Failure::ptr_eq(&a, &b));
/// assert_eq!(a.to_string(), "boom");
/// ```
#[derive(Clone)]
pub struct Failure {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Failure {
    /// Wraps an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Builds a failure from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Adopts an already boxed error without re-wrapping it.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            inner: Arc::from(error),
        }
    }

    /// Returns `true` if both failures point to the same error value.
    pub fn ptr_eq(a: &Failure, b: &Failure) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Returns the concrete error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Returns `true` if the concrete error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Returns the underlying error as a trait object.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl From<Failure> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(failure: Failure) -> Self {
        Box::new(Shared(failure.inner))
    }
}

impl From<Failure> for Box<dyn StdError + 'static> {
    fn from(failure: Failure) -> Self {
        Box::new(Shared(failure.inner))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&self.inner).finish()
    }
}

/// Plain-message error behind [`Failure::msg`].
#[derive(Error, Debug)]
#[error("{0}")]
struct Message(String);

/// Error adapter that keeps the shared allocation when a failure leaves the crate as a box.
#[derive(Debug)]
struct Shared(Arc<dyn StdError + Send + Sync + 'static>);

impl fmt::Display for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl StdError for Shared {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// # Failures attached by the runtime.
///
/// These appear in an [`Outcome`] only when the unit of work could not report one
/// itself. They are still ordinary failures from the observer's point of view.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkError {
    /// The unit of work panicked; the panic payload was captured as text.
    #[error("work panicked: {reason}")]
    Panicked {
        /// Panic message, or `"unknown panic"` for non-string payloads.
        reason: String,
    },

    /// The producer went away without completing the signal
    /// (runtime shutdown, uncaught panic, or a dropped [`Completer`](crate::Completer)).
    #[error("work abandoned before completion")]
    Abandoned,
}

impl WorkError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use signalwait::WorkError;
    ///
    /// assert_eq!(WorkError::Abandoned.as_label(), "work_abandoned");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkError::Panicked { .. } => "work_panicked",
            WorkError::Abandoned => "work_abandoned",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WorkError::Panicked { reason } => format!("panic: {reason}"),
            WorkError::Abandoned => "abandoned".to_string(),
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        WorkError::Panicked {
            reason: panic_message(payload),
        }
    }
}

/// Renders a panic payload the way `std` prints it.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("disk full on {volume}")]
    struct DiskFull {
        volume: &'static str,
    }

    #[test]
    fn test_clone_keeps_identity() {
        let f = Failure::new(DiskFull { volume: "/var" });
        let g = f.clone();
        assert!(Failure::ptr_eq(&f, &g));
    }

    #[test]
    fn test_equal_content_is_not_identical() {
        let a = Failure::msg("same");
        let b = Failure::msg("same");
        assert_eq!(a.to_string(), b.to_string());
        assert!(!Failure::ptr_eq(&a, &b));
    }

    #[test]
    fn test_downcast_to_original_type() {
        let f: Failure = DiskFull { volume: "/tmp" }.into();
        assert!(f.is::<DiskFull>());
        assert_eq!(f.downcast_ref::<DiskFull>().map(|e| e.volume), Some("/tmp"));
        assert!(f.downcast_ref::<WorkError>().is_none());
        assert_eq!(f.to_string(), "disk full on /tmp");
    }

    #[derive(Error, Debug)]
    #[error("upload failed")]
    struct UploadFailed(#[source] DiskFull);

    #[test]
    fn test_as_error_exposes_source_chain() {
        let f = Failure::new(UploadFailed(DiskFull { volume: "/srv" }));
        let err = f.as_error();
        assert_eq!(err.to_string(), "upload failed");
        assert_eq!(
            err.source().map(|e| e.to_string()).as_deref(),
            Some("disk full on /srv")
        );
    }

    #[test]
    fn test_from_boxed_keeps_message() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(DiskFull { volume: "/" });
        let f = Failure::from_boxed(boxed);
        assert!(f.is::<DiskFull>());
    }

    #[test]
    fn test_question_mark_into_box() {
        fn run() -> Result<(), Box<dyn StdError + Send + Sync>> {
            let outcome: Outcome = Err(Failure::msg("nope"));
            outcome?;
            Ok(())
        }
        let err = run().unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_work_error_labels() {
        let p = WorkError::Panicked {
            reason: "index out of bounds".into(),
        };
        assert_eq!(p.as_label(), "work_panicked");
        assert_eq!(p.as_message(), "panic: index out of bounds");
        assert_eq!(WorkError::Abandoned.as_message(), "abandoned");
    }

    #[test]
    fn test_from_panic_payloads() {
        let s: Box<dyn Any + Send> = Box::new("static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(
            WorkError::from_panic(&*s),
            WorkError::Panicked { reason: "static".into() }
        );
        assert_eq!(
            WorkError::from_panic(&*owned),
            WorkError::Panicked { reason: "owned".into() }
        );
        assert_eq!(
            WorkError::from_panic(&*other),
            WorkError::Panicked { reason: "unknown panic".into() }
        );
    }
}

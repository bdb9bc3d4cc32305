//! Error constructors and accessors

use super::types::{AnnotatedError, AnnotatedInner, BoxError};
use crate::capture::{self, CallSite, Capture};
use std::panic::Location;
use std::sync::Arc;
use tonic::Code;

/// Wrap `cause` with a message and status code
///
/// Records the caller's file, enclosing function and line, plus a stack
/// trace, using the installed [`Capture`] provider.
///
/// ```no_run
/// use errchain::wrap;
/// use tonic::Code;
///
/// let err = wrap("connection reset", "fetching profile", Code::Unavailable);
/// assert_eq!(err.to_string(), "Unavailable (14): fetching profile");
/// ```
#[track_caller]
pub fn wrap<E, M>(cause: E, message: M, code: Code) -> AnnotatedError
where
    E: Into<BoxError>,
    M: Into<String>,
{
    wrap_with(capture::installed(), cause, message, code)
}

/// [`wrap`] with an explicit capture provider
#[track_caller]
pub fn wrap_with<E, M>(capture: &dyn Capture, cause: E, message: M, code: Code) -> AnnotatedError
where
    E: Into<BoxError>,
    M: Into<String>,
{
    let caller = Location::caller();

    AnnotatedError {
        inner: Arc::new(AnnotatedInner {
            cause: cause.into(),
            message: message.into(),
            code,
            location: capture.call_site(caller),
            stack_trace: capture.stack_trace(),
        }),
    }
}

impl AnnotatedError {
    /// Same as the free function [`wrap`]
    #[track_caller]
    pub fn wrap<E, M>(cause: E, message: M, code: Code) -> Self
    where
        E: Into<BoxError>,
        M: Into<String>,
    {
        wrap_with(capture::installed(), cause, message, code)
    }

    /// The wrapped error
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.cause.as_ref()
    }

    /// Context supplied at the wrap
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Status code of this layer
    #[must_use]
    pub fn code(&self) -> Code {
        self.inner.code
    }

    /// Where this error was wrapped
    #[must_use]
    pub fn location(&self) -> &CallSite {
        &self.inner.location
    }

    /// Base name of the source file of the wrap
    #[must_use]
    pub fn file(&self) -> &str {
        &self.inner.location.file
    }

    /// Function enclosing the wrap
    #[must_use]
    pub fn function(&self) -> &str {
        &self.inner.location.function
    }

    /// Line of the wrap
    #[must_use]
    pub fn line(&self) -> u32 {
        self.inner.location.line
    }

    /// Stack trace captured at the wrap, empty when capture was disabled
    #[must_use]
    pub fn stack_trace(&self) -> &str {
        &self.inner.stack_trace
    }

    /// Whether `self` and `other` are handles to the same node
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

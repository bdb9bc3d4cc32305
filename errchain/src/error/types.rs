//! Core error types and definitions

use crate::capture::CallSite;
use std::sync::Arc;
use thiserror::Error;
use tonic::Code;

/// Boxed cause accepted by [`wrap`](crate::wrap)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error annotated with context, status code and call site
///
/// Created once by [`wrap`](crate::wrap) and immutable afterwards. Cloning
/// is cheap and yields another handle to the same node.
#[derive(Debug, Clone)]
pub struct AnnotatedError {
    pub(super) inner: Arc<AnnotatedInner>,
}

#[derive(Debug)]
pub(super) struct AnnotatedInner {
    /// The wrapped error
    pub cause: BoxError,
    /// Why the wrap happened
    pub message: String,
    /// Status code reported at this layer
    pub code: Code,
    /// Where the wrap happened
    pub location: CallSite,
    /// Stack captured at construction
    pub stack_trace: String,
}

/// Failures of this crate's own operations
#[derive(Debug, Error)]
pub enum Error {
    /// JSON encoding of an error report failed
    #[error("failed to encode error report: {0}")]
    Encode(#[source] serde_json::Error),

    /// A JSON document is not a valid error report
    #[error("failed to decode error report: {0}")]
    Decode(#[source] serde_json::Error),

    /// A process-wide capture provider is already installed
    #[error("capture provider already installed")]
    CaptureInstalled,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

//! JSON reports of error chains
//!
//! A report mirrors one [`AnnotatedError`] node. Its `error` field holds the
//! report of the cause when the cause is annotated, or the cause's text
//! otherwise, so a whole chain renders as nested objects:
//!
//! ```json
//! {
//!     "error": "connection reset",
//!     "message": "fetching profile",
//!     "file": "client.rs",
//!     "function": "Client::profile()",
//!     "line": 42,
//!     "code": "Unavailable (14)",
//!     "stack_trace": "..."
//! }
//! ```

use super::chain::{unwrap, MaybeError};
use super::types::{AnnotatedError, Error, Result};
use crate::code::CodeExt;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Serializable view of one node and, recursively, its cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// The cause
    pub error: ReportCause,
    /// Context supplied at the wrap
    pub message: String,
    /// Base name of the source file
    pub file: String,
    /// Enclosing function
    pub function: String,
    /// Line of the wrap
    pub line: u32,
    /// `"<name> (<number>)"`
    pub code: String,
    /// Stack captured at the wrap
    pub stack_trace: String,
}

/// The `error` field of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportCause {
    /// The cause was itself annotated
    Nested(Box<ErrorReport>),
    /// Rendered text of a plain cause
    Text(String),
}

impl ErrorReport {
    /// Number of reports in this chain, including `self`
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.error {
            ReportCause::Nested(inner) => 1 + inner.depth(),
            ReportCause::Text(_) => 1,
        }
    }

    /// Decode a document produced by [`AnnotatedError::to_json`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when `json` is not a report.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Decode)
    }
}

impl AnnotatedError {
    /// Report of this node and everything below it
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        let error = match unwrap(self.cause()) {
            Some(inner) => ReportCause::Nested(Box::new(inner.report())),
            None => ReportCause::Text(self.cause().to_string()),
        };

        ErrorReport {
            error,
            message: self.message().to_string(),
            file: self.file().to_string(),
            function: self.function().to_string(),
            line: self.line(),
            code: self.code().label(),
            stack_trace: self.stack_trace().to_string(),
        }
    }

    /// Render the chain as indented JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when encoding fails at any level. No partial
    /// document is produced.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
        self.report()
            .serialize(&mut serializer)
            .map_err(Error::Encode)?;

        String::from_utf8(out).map_err(|e| Error::Encode(serde::ser::Error::custom(e)))
    }
}

impl Serialize for AnnotatedError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.report().serialize(serializer)
    }
}

/// Render `err` as JSON when annotated, as its plain text otherwise
///
/// An absent `err` renders as the empty string.
///
/// # Errors
///
/// Returns [`Error::Encode`] when encoding an annotated chain fails.
pub fn to_json<'a>(err: impl MaybeError<'a>) -> Result<String> {
    let Some(err) = err.as_error() else {
        return Ok(String::new());
    };

    match unwrap(err) {
        Some(annotated) => annotated.to_json(),
        None => Ok(err.to_string()),
    }
}

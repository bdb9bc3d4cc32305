//! Annotated errors for layered applications
//!
//! This crate wraps underlying failures with:
//! - A human-readable message explaining the wrap
//! - A gRPC status code ([`tonic::Code`])
//! - The call site (file, function, line) of the wrap
//! - A full stack trace captured at construction
//!
//! and provides chain inspection on top: root extraction, containment checks
//! and recursive JSON rendering.
//!
//! ```no_run
//! use errchain::{contains_code, get_root, wrap};
//! use tonic::Code;
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
//! let inner = wrap(io, "loading settings", Code::NotFound);
//! let outer = wrap(inner, "starting service", Code::Unavailable);
//!
//! assert!(contains_code(&outer, Code::NotFound));
//! assert_eq!(get_root(&outer).map(|e| e.message()), Some("loading settings"));
//! ```

pub mod capture;
pub mod code;
pub mod error;
pub mod status;

pub use capture::{BacktraceCapture, CallSite, Capture};
pub use code::CodeExt;
pub use error::chain::{
    contains_code, contains_error, get_root, unwrap, unwrap_all, Chain, MaybeError,
};
pub use error::report::{to_json, ErrorReport, ReportCause};
pub use error::{wrap, wrap_with, AnnotatedError, BoxError, Error, Result};

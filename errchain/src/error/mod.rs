//! Annotated errors and chain inspection
//!
//! Provides:
//! - [`AnnotatedError`], a wrapper carrying message, status code, call site
//!   and stack trace around an underlying cause
//! - Chain traversal and containment checks over nested wraps
//! - Recursive JSON reports of a whole chain

pub mod chain;
pub mod constructors;
pub mod display;
pub mod report;
pub mod types;

pub use constructors::{wrap, wrap_with};
pub use types::{AnnotatedError, BoxError, Error, Result};

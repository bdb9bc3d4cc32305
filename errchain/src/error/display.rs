//! Display and trait implementations for AnnotatedError

use super::types::AnnotatedError;
use crate::code::CodeExt;
use std::fmt;

impl fmt::Display for AnnotatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.inner.code.label(), self.inner.message)
    }
}

impl std::error::Error for AnnotatedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

//! Conversion to gRPC statuses
//!
//! Only the outermost code and message cross the boundary. Causes, call
//! sites and stack traces stay on the server side.

use crate::error::AnnotatedError;
use tonic::Status;

impl From<&AnnotatedError> for Status {
    fn from(err: &AnnotatedError) -> Self {
        Status::new(err.code(), err.message())
    }
}

impl From<AnnotatedError> for Status {
    fn from(err: AnnotatedError) -> Self {
        Status::from(&err)
    }
}

//! Canonical names and numbers for gRPC status codes

use tonic::Code;

/// Stable rendering of [`Code`] values
///
/// Names are the canonical gRPC code strings (`OK`, `Canceled`,
/// `InvalidArgument`, ...). They are what rendered errors and JSON reports
/// show, and what [`contains_code`](crate::contains_code) searches for.
pub trait CodeExt {
    /// Canonical name, e.g. `InvalidArgument`
    fn name(&self) -> &'static str;

    /// Wire value of the code
    fn number(&self) -> i32;

    /// `"<name> (<number>)"`, e.g. `InvalidArgument (3)`
    fn label(&self) -> String {
        format!("{} ({})", self.name(), self.number())
    }
}

impl CodeExt for Code {
    fn name(&self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "Canceled",
            Code::Unknown => "Unknown",
            Code::InvalidArgument => "InvalidArgument",
            Code::DeadlineExceeded => "DeadlineExceeded",
            Code::NotFound => "NotFound",
            Code::AlreadyExists => "AlreadyExists",
            Code::PermissionDenied => "PermissionDenied",
            Code::ResourceExhausted => "ResourceExhausted",
            Code::FailedPrecondition => "FailedPrecondition",
            Code::Aborted => "Aborted",
            Code::OutOfRange => "OutOfRange",
            Code::Unimplemented => "Unimplemented",
            Code::Internal => "Internal",
            Code::Unavailable => "Unavailable",
            Code::DataLoss => "DataLoss",
            Code::Unauthenticated => "Unauthenticated",
        }
    }

    fn number(&self) -> i32 {
        *self as i32
    }
}

//! Tests for the process-wide capture provider
//!
//! Kept in their own binary since installation is global and one-shot.

mod common;

use common::{init_logging, FixedCapture, PlainError, FIXTURE_FILE, FIXTURE_FUNCTION, FIXTURE_STACK};
use errchain::{capture, wrap, BacktraceCapture, Error};
use tonic::Code;

#[test]
fn test_installed_provider_is_used_once() {
    init_logging();

    assert!(capture::install(FixedCapture).is_ok());
    assert!(matches!(
        capture::install(BacktraceCapture::new()),
        Err(Error::CaptureInstalled)
    ));

    let line = line!() + 1;
    let err = wrap(PlainError("test"), "test message", Code::FailedPrecondition);

    assert_eq!(err.file(), FIXTURE_FILE);
    assert_eq!(err.function(), FIXTURE_FUNCTION);
    assert_eq!(err.stack_trace(), FIXTURE_STACK);
    assert_eq!(err.line(), line);
}

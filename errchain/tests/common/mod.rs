//! Shared fixtures for integration tests

#![allow(dead_code)]

use errchain::{CallSite, Capture};
use std::panic::Location;

pub const FIXTURE_FILE: &str = "fixture.rs";
pub const FIXTURE_FUNCTION: &str = "Fixture::run()";
pub const FIXTURE_STACK: &str = "fixture stack";

/// Plain error used as the leaf of test chains
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PlainError(pub &'static str);

/// Deterministic provider: fixed file, function and stack, real caller line
pub struct FixedCapture;

impl Capture for FixedCapture {
    fn call_site(&self, caller: &'static Location<'static>) -> CallSite {
        CallSite::new(FIXTURE_FILE, FIXTURE_FUNCTION, caller.line())
    }

    fn stack_trace(&self) -> String {
        FIXTURE_STACK.to_string()
    }
}

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

//! Call-site and stack capture
//!
//! [`wrap`](crate::wrap) asks a [`Capture`] provider for two things at
//! construction time: the [`CallSite`] of its caller and a textual stack
//! trace. The default provider is [`BacktraceCapture`]. A different provider
//! can be installed once per process with [`install`], or passed explicitly
//! to [`wrap_with`](crate::wrap_with).

mod symbol;

use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;
use std::path::Path;

use symbol::canonical_function_name;

/// File placeholder used when the caller could not be determined
pub const UNKNOWN_FILE: &str = "?";

/// Function placeholder used when no stack frame matched the caller
pub const UNKNOWN_FUNCTION: &str = "?()";

static INSTALLED: OnceCell<Box<dyn Capture>> = OnceCell::new();
static DEFAULT: BacktraceCapture = BacktraceCapture::new();

/// Where an annotated error was constructed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    /// Base name of the source file, e.g. `handlers.rs`
    pub file: String,
    /// Enclosing function, e.g. `Server::handle()` or `load()`
    pub function: String,
    /// 1-based line of the wrap call
    pub line: u32,
}

impl CallSite {
    /// Build a call site from already-resolved parts
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }

    /// Call site with placeholder values
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FILE, UNKNOWN_FUNCTION, 0)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.file, self.line, self.function)
    }
}

/// Provider of call-site metadata and stack traces
///
/// `caller` is the location of the code that invoked the wrap entry point,
/// as reported by `#[track_caller]`.
pub trait Capture: Send + Sync {
    /// Resolve the call site for `caller`
    fn call_site(&self, caller: &'static Location<'static>) -> CallSite;

    /// Capture the current stack as text
    fn stack_trace(&self) -> String;
}

/// Default provider backed by the `backtrace` crate
///
/// File and line come straight from the caller's [`Location`]. The function
/// name is found by walking the live stack for the frame that sits at that
/// file and line, then normalizing its demangled symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktraceCapture {
    stack_trace: bool,
    function_names: bool,
}

impl BacktraceCapture {
    /// Provider with the crate defaults
    ///
    /// Stack traces are recorded when the `full-backtrace` feature is
    /// enabled (the default). Function names are always resolved.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack_trace: cfg!(feature = "full-backtrace"),
            function_names: true,
        }
    }

    /// Toggle recording of the full stack trace
    #[must_use]
    pub const fn with_stack_trace(mut self, enabled: bool) -> Self {
        self.stack_trace = enabled;
        self
    }

    /// Toggle symbol resolution of the enclosing function
    ///
    /// When disabled every call site reports [`UNKNOWN_FUNCTION`].
    #[must_use]
    pub const fn with_function_names(mut self, enabled: bool) -> Self {
        self.function_names = enabled;
        self
    }
}

impl Default for BacktraceCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture for BacktraceCapture {
    fn call_site(&self, caller: &'static Location<'static>) -> CallSite {
        let function = if self.function_names {
            enclosing_function(caller).map_or_else(
                || {
                    log::debug!(
                        "no stack frame matched {}:{}, function left unresolved",
                        caller.file(),
                        caller.line()
                    );
                    UNKNOWN_FUNCTION.to_string()
                },
                |raw| canonical_function_name(&raw),
            )
        } else {
            UNKNOWN_FUNCTION.to_string()
        };

        CallSite::new(base_name(caller.file()), function, caller.line())
    }

    fn stack_trace(&self) -> String {
        if self.stack_trace {
            format!("{:?}", backtrace::Backtrace::new())
        } else {
            String::new()
        }
    }
}

/// Install the process-wide provider used by [`wrap`](crate::wrap)
///
/// # Errors
///
/// Returns [`Error::CaptureInstalled`] when a provider was already installed.
pub fn install<C>(capture: C) -> Result<()>
where
    C: Capture + 'static,
{
    INSTALLED.set(Box::new(capture)).map_err(|_| {
        log::warn!("capture provider already installed, keeping the existing one");
        Error::CaptureInstalled
    })
}

/// The provider [`wrap`](crate::wrap) uses
#[must_use]
pub fn installed() -> &'static dyn Capture {
    match INSTALLED.get() {
        Some(capture) => &**capture,
        None => &DEFAULT,
    }
}

fn base_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
        .to_string()
}

/// Demangled symbol of the frame executing at `caller`
///
/// Prefers a frame whose debug info points at the exact file and line. Falls
/// back to the innermost frame in the same file, which covers call
/// expressions spanning several lines.
fn enclosing_function(caller: &Location<'_>) -> Option<String> {
    let target = Path::new(caller.file());
    let mut exact: Option<String> = None;
    let mut nearest: Option<String> = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if exact.is_some() {
                return;
            }
            let (Some(path), Some(name)) = (symbol.filename(), symbol.name()) else {
                return;
            };
            if !path.ends_with(target) {
                return;
            }
            let name = format!("{name:#}");
            if symbol.lineno() == Some(caller.line()) {
                exact = Some(name);
            } else if nearest.is_none() {
                nearest = Some(name);
            }
        });
        exact.is_none()
    });

    exact.or_else(|| {
        if let Some(name) = &nearest {
            log::trace!(
                "using nearest frame {name} for {}:{}",
                caller.file(),
                caller.line()
            );
        }
        nearest
    })
}

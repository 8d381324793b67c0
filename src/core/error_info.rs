//! Error records attached to log events
//!
//! An [`ErrorInfo`] owns its optional inner error, forming a singly linked,
//! acyclic chain from the outermost failure to the root cause.

use super::error::{LoggerError, Result};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Deferred stack trace reader; may fail at read time
pub type StackTraceReader = Arc<dyn Fn() -> Result<Option<String>> + Send + Sync>;

/// Where an error's stack trace comes from
#[derive(Clone, Default)]
pub enum StackTrace {
    #[default]
    Unavailable,
    Text(String),
    Backtrace(Arc<Backtrace>),
    Deferred(StackTraceReader),
}

impl StackTrace {
    /// Capture a backtrace here; honours `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`
    pub fn capture() -> Self {
        StackTrace::Backtrace(Arc::new(Backtrace::capture()))
    }

    pub fn deferred<F>(reader: F) -> Self
    where
        F: Fn() -> Result<Option<String>> + Send + Sync + 'static,
    {
        StackTrace::Deferred(Arc::new(reader))
    }

    /// Read the trace. `Ok(None)` means there is nothing to show.
    pub fn read(&self) -> Result<Option<String>> {
        match self {
            StackTrace::Unavailable => Ok(None),
            StackTrace::Text(text) => Ok(Some(text.clone())),
            StackTrace::Backtrace(backtrace) => match backtrace.status() {
                BacktraceStatus::Captured => Ok(Some(backtrace.to_string())),
                BacktraceStatus::Disabled => Ok(None),
                BacktraceStatus::Unsupported => {
                    Err(LoggerError::stack_trace("backtraces unsupported on this platform"))
                }
                _ => Ok(None),
            },
            StackTrace::Deferred(reader) => reader(),
        }
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackTrace::Unavailable => write!(f, "Unavailable"),
            StackTrace::Text(text) => f.debug_tuple("Text").field(text).finish(),
            StackTrace::Backtrace(backtrace) => {
                f.debug_tuple("Backtrace").field(&backtrace.status()).finish()
            }
            StackTrace::Deferred(_) => write!(f, "Deferred(..)"),
        }
    }
}

/// A raised failure, optionally wrapping the error that caused it
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    type_name: String,
    message: String,
    stack: StackTrace,
    source: Option<String>,
    code: i32,
    inner: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack: StackTrace::Unavailable,
            source: None,
            code: 0,
            inner: None,
        }
    }

    /// Build a chain from a Rust error and its `source()` links
    ///
    /// The outer record is named after `E` and carries a backtrace captured
    /// here. Sources are only known as `dyn Error`, so they are named `Error`,
    /// except `std::io::Error` which becomes `IoError` with the OS error code.
    pub fn from_error<E: StdError + 'static>(error: &E) -> Self {
        let mut info = Self::from_dyn(error, short_type_name::<E>());
        info.stack = StackTrace::capture();
        info
    }

    fn from_dyn(error: &(dyn StdError + 'static), type_name: &str) -> Self {
        let (type_name, code) = match error.downcast_ref::<std::io::Error>() {
            Some(io_error) => ("IoError", io_error.raw_os_error().unwrap_or(0)),
            None => (type_name, 0),
        };

        Self {
            type_name: type_name.to_string(),
            message: error.to_string(),
            stack: StackTrace::Unavailable,
            source: None,
            code,
            inner: error
                .source()
                .map(|cause| Box::new(Self::from_dyn(cause, "Error"))),
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = StackTrace::Text(stack.into());
        self
    }

    #[must_use]
    pub fn with_stack_trace(mut self, stack: StackTrace) -> Self {
        self.stack = stack;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn with_inner(mut self, inner: ErrorInfo) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Result code as 8 uppercase hex digits (two's complement for negatives)
    pub fn code_hex(&self) -> String {
        format!("{:08X}", self.code as u32)
    }

    pub fn stack_trace(&self) -> Result<Option<String>> {
        self.stack.read()
    }

    pub fn inner(&self) -> Option<&ErrorInfo> {
        self.inner.as_deref()
    }

    /// This error followed by every error it wraps, outermost first
    pub fn chain(&self) -> impl Iterator<Item = &ErrorInfo> {
        std::iter::successors(Some(self), |error| error.inner())
    }
}

/// Last path segment of a type name, without generic arguments
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

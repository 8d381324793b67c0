//! # Structured Log JSON
//!
//! Serializes structured log events into one canonical JSON line each.
//!
//! ## Features
//!
//! - **Fixed field order**: `type`, `timestamp`, `level`, `levelNumber`, `message`,
//!   then the well-known optional fields and a generic `properties` bag
//! - **Closed value model**: scalars, structures, dictionaries and sequences
//! - **Error chains**: the outer error plus a flat `innerErrors` array
//! - **Correlation ids**: taken from the request snapshot or a `RequestId` property
//! - **Environment setup**: log level, format and app/environment/infra enrichment
//!
//! ```
//! use structured_log_json::prelude::*;
//!
//! let event = LogEvent::new(LogLevel::Warn, "Slow query {Ms}")
//!     .with_property("Ms", 812)
//!     .with_property("RequestId", "abc-123");
//!
//! let line = JsonFormatter::new().format_line(&event).unwrap();
//! assert!(line.contains(r#""correlationId":"abc-123","properties":{"Ms":812}"#));
//! ```

pub mod config;
pub mod core;
pub mod enrichers;
pub mod info;
pub mod macros;
pub mod request;

pub mod prelude {
    pub use crate::config::LoggerConfig;
    pub use crate::core::{
        Dictionary, Enricher, ErrorInfo, JsonFormatter, LogEvent, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat, Result, ScalarValue,
        StackTrace, Structure, StructuredValue, ValueFormatter,
    };
    pub use crate::request::{RequestSnapshot, ResponseSnapshot};
}

pub use config::{logger_from_env, LoggerConfig};
pub use core::{
    format_error, resolve_correlation_id, Dictionary, Enricher, ErrorInfo, JsonFormatter,
    LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat,
    Properties, Result, ScalarValue, StackTrace, Structure, StructuredValue, TimestampFormat,
    ValueFormatter,
};
pub use request::{RequestSnapshot, ResponseSnapshot};

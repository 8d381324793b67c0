//! Core event model, formatters and logger

pub mod correlation;
pub mod enricher;
pub mod error;
pub mod error_formatter;
pub mod error_info;
pub mod json_formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;
pub mod value;
pub mod value_formatter;

pub use correlation::resolve_correlation_id;
pub use enricher::Enricher;
pub use error::{LoggerError, Result};
pub use error_formatter::format_error;
pub use error_info::{ErrorInfo, StackTrace, StackTraceReader};
pub use json_formatter::{is_reserved_property, JsonFormatter, RESERVED_PROPERTIES};
pub use log_event::{LogEvent, Properties};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
pub use value::{Dictionary, ScalarValue, Structure, StructuredValue};
pub use value_formatter::{JsonValue, ValueFormatter, DEFAULT_TYPE_TAG_NAME};

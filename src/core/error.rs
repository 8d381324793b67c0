//! Error types for the log serializer

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Level name outside the closed trace..fatal set
    #[error("Unsupported log level: '{0}'")]
    UnsupportedLevel(String),

    /// Stack trace could not be read for an error record
    #[error("Stack trace unavailable: {0}")]
    StackTraceUnavailable(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported level error
    pub fn unsupported_level(name: impl Into<String>) -> Self {
        LoggerError::UnsupportedLevel(name.into())
    }

    /// Create a stack trace error
    pub fn stack_trace(message: impl Into<String>) -> Self {
        LoggerError::StackTraceUnavailable(message.into())
    }
}

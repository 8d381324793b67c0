//! Logging macros for building events with properties inline.
//!
//! The template is kept as written; `"Name" => value` pairs become
//! properties in the order given.
//!
//! # Examples
//!
//! ```
//! use structured_log_json::prelude::*;
//! use structured_log_json::info;
//!
//! let logger = Logger::builder().writer(std::io::sink()).build();
//!
//! // Template only
//! info!(logger, "Server started");
//!
//! // With properties
//! let port = 8080;
//! info!(logger, "Listening on {Port}", "Port" => port);
//! ```

/// Log an event at the given level.
///
/// # Examples
///
/// ```
/// # use structured_log_json::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// use structured_log_json::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Upstream returned {Status}", "Status" => 502);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $name:expr => $value:expr)* $(,)?) => {
        $logger.log(
            $crate::LogEvent::new($level, $template)
                $(.with_property($name, $value))*
        )
    };
}

/// Log a trace-level event.
///
/// # Examples
///
/// ```
/// # use structured_log_json::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).writer(std::io::sink()).build();
/// use structured_log_json::trace;
/// trace!(logger, "Entering {Function}", "Function" => "calculate");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level event.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level event.
///
/// # Examples
///
/// ```
/// # use structured_log_json::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// use structured_log_json::info;
/// info!(logger, "Processed {Count} items", "Count" => 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level event.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level event.
///
/// Attach an error with [`LogEvent::with_error`](crate::LogEvent::with_error)
/// or [`Logger::error_with`](crate::Logger::error_with) instead.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level event.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capturing_logger(level: LogLevel) -> (Logger, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder()
            .min_level(level)
            .writer(capture.clone())
            .build();
        (logger, capture)
    }

    fn last_line(capture: &Capture) -> serde_json::Value {
        let text = String::from_utf8(capture.0.lock().clone()).unwrap();
        serde_json::from_str(text.lines().last().unwrap()).unwrap()
    }

    #[test]
    fn test_log_macro_with_properties() {
        let (logger, capture) = capturing_logger(LogLevel::Info);
        log!(logger, LogLevel::Info, "Order {Id} for {User}", "Id" => 7, "User" => "alice",);

        let line = last_line(&capture);
        assert_eq!(line["message"], "Order {Id} for {User}");
        assert_eq!(line["properties"]["Id"], 7);
        assert_eq!(line["properties"]["User"], "alice");
    }

    #[test]
    fn test_macro_accepts_lengths() {
        let (logger, capture) = capturing_logger(LogLevel::Info);
        let orders = vec![1, 2, 3];
        info!(logger, "Loaded {Count} orders", "Count" => orders.len());

        assert_eq!(last_line(&capture)["properties"]["Count"], 3);
    }

    #[test]
    fn test_level_macros() {
        let (logger, capture) = capturing_logger(LogLevel::Trace);
        trace!(logger, "t");
        debug!(logger, "d");
        info!(logger, "i");
        warn!(logger, "w", "Attempt" => 2);
        error!(logger, "e");
        fatal!(logger, "f");

        let text = String::from_utf8(capture.0.lock().clone()).unwrap();
        let levels: Vec<String> = text
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["level"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(levels, ["trace", "debug", "info", "warn", "error", "fatal"]);
    }

    #[test]
    fn test_macro_respects_min_level() {
        let (logger, _capture) = capturing_logger(LogLevel::Error);
        info!(logger, "ignored");
        assert_eq!(logger.metrics().filtered_count(), 1);
    }
}

//! Logger front end
//!
//! Filters events by level, runs enrichers, renders each event to a complete
//! line and hands it to the writer in one `write_all` while holding the
//! writer lock, so concurrent callers never interleave partial lines.

use super::{
    enricher::Enricher,
    error::Result,
    error_info::ErrorInfo,
    json_formatter::{JsonFormatter, SOURCE_CONTEXT_PROPERTY},
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    value::StructuredValue,
};
use parking_lot::Mutex;
use std::io::Write;

pub struct Logger {
    min_level: LogLevel,
    /// Component prefix → minimum level; longest matching prefix wins
    level_overrides: Vec<(String, LogLevel)>,
    enrichers: Vec<Box<dyn Enricher>>,
    output_format: OutputFormat,
    formatter: JsonFormatter,
    use_colors: bool,
    writer: Mutex<Box<dyn Write + Send>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// JSON logger at `info` writing to stdout
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Minimum level that applies to events from `component`
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|component| {
                self.level_overrides
                    .iter()
                    .filter(|(prefix, _)| component.starts_with(prefix.as_str()))
                    .max_by_key(|(prefix, _)| prefix.len())
                    .map(|(_, level)| *level)
            })
            .unwrap_or(self.min_level)
    }

    pub fn is_enabled(&self, level: LogLevel, component: Option<&str>) -> bool {
        level >= self.effective_level(component)
    }

    /// Filter, enrich and write one event
    ///
    /// Failures are reported on stderr and counted; they never reach the caller.
    pub fn log(&self, event: LogEvent) {
        match self.try_log(event) {
            Ok(_) => {}
            Err(e) => {
                self.metrics.record_failed_write();
                eprintln!("[LOGGER ERROR] Failed to write log event: {}", e);
            }
        }
    }

    /// Like [`Logger::log`] but returns the error; `Ok(false)` when filtered out
    pub fn try_log(&self, mut event: LogEvent) -> Result<bool> {
        let component = match event.property(SOURCE_CONTEXT_PROPERTY) {
            Some(StructuredValue::Scalar(scalar)) => scalar.to_plain_string(),
            _ => None,
        };
        if !self.is_enabled(event.level, component.as_deref()) {
            self.metrics.record_filtered();
            return Ok(false);
        }

        for enricher in &self.enrichers {
            enricher.enrich(&mut event);
        }

        let line = self
            .output_format
            .format(&event, &self.formatter, self.use_colors)?;

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        drop(writer);

        self.metrics.record_logged();
        Ok(true)
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    pub fn trace(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Trace, template));
    }

    pub fn debug(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Debug, template));
    }

    pub fn info(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Info, template));
    }

    pub fn warn(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Warn, template));
    }

    pub fn error(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Error, template));
    }

    pub fn fatal(&self, template: impl Into<String>) {
        self.log(LogEvent::new(LogLevel::Fatal, template));
    }

    /// Error-level event carrying `error`
    pub fn error_with(&self, template: impl Into<String>, error: ErrorInfo) {
        self.log(LogEvent::new(LogLevel::Error, template).with_error(error));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```
/// use structured_log_json::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .level_override("hyper", LogLevel::Warn)
///     .output_format(OutputFormat::Json)
///     .writer(std::io::sink())
///     .build();
///
/// logger.debug("Connected to {Host}");
/// assert_eq!(logger.metrics().total_logged(), 1);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    level_overrides: Vec<(String, LogLevel)>,
    enrichers: Vec<Box<dyn Enricher>>,
    output_format: OutputFormat,
    formatter: JsonFormatter,
    use_colors: bool,
    writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            level_overrides: Vec::new(),
            enrichers: Vec::new(),
            output_format: OutputFormat::Json,
            formatter: JsonFormatter::new(),
            use_colors: false,
            writer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Minimum level for components starting with `prefix`
    #[must_use = "builder methods return a new value"]
    pub fn level_override(mut self, prefix: impl Into<String>, level: LogLevel) -> Self {
        self.level_overrides.push((prefix.into(), level));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enricher<E: Enricher + 'static>(mut self, enricher: E) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_enricher(mut self, enricher: Box<dyn Enricher>) -> Self {
        self.enrichers.push(enricher);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn component_fallback(mut self, component: impl Into<String>) -> Self {
        self.formatter = self.formatter.with_component_fallback(component);
        self
    }

    /// Color the level label in text output
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Destination for lines; stdout when not set
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    pub fn build(self) -> Logger {
        let writer: Box<dyn Write + Send> = match self.writer {
            Some(writer) => writer,
            None => Box::new(std::io::stdout()),
        };

        Logger {
            min_level: self.min_level,
            level_overrides: self.level_overrides,
            enrichers: self.enrichers,
            output_format: self.output_format,
            formatter: self.formatter,
            use_colors: self.use_colors,
            writer: Mutex::new(writer),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

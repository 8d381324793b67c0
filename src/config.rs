//! Logger configuration from the environment
//!
//! - `LOG_LEVEL`: minimum level, `info` when missing or unrecognised
//! - `LOG_FORMAT`: `text` or `json`
//! - deployment detection: containers, EKS and serverless runtimes log JSON
//!   and raise noisy dependency crates to `warn`

use crate::core::{LogLevel, Logger, LoggerBuilder, LoggerError, OutputFormat, Result};
use crate::enrichers::standard_enrichers;
use crate::info::{process_env, EKS_ENV, LAMBDA_FUNCTION_NAME_ENV};

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
/// `true` inside container images that set it
pub const RUNNING_IN_CONTAINER_ENV: &str = "RUNNING_IN_CONTAINER";

/// Component prefixes whose minimum level depends on deployment
pub const DEPENDENCY_COMPONENTS: [&str; 2] = ["hyper", "tokio"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub log_format: Option<OutputFormat>,
    pub deployed: bool,
    pub component_fallback: Option<String>,
    pub use_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            log_format: None,
            deployed: false,
            component_fallback: None,
            use_colors: true,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Read the configuration, falling back to defaults for invalid values
    ///
    /// Rejected values are reported on stderr.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::try_from_lookup(&lookup) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[LOGGER ERROR] {}; using defaults for invalid settings", e);
                let min_level = lookup(LOG_LEVEL_ENV)
                    .and_then(|level| level.parse().ok())
                    .unwrap_or(LogLevel::Info);
                let log_format = lookup(LOG_FORMAT_ENV).and_then(|format| parse_log_format(&format).ok());
                Self::detect_deployment(&lookup, min_level, log_format)
            }
        }
    }

    /// Like [`LoggerConfig::from_lookup`] but rejects unknown `LOG_LEVEL` or
    /// `LOG_FORMAT` values
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_level = match lookup(LOG_LEVEL_ENV) {
            Some(level) => level.parse::<LogLevel>().map_err(|_| {
                LoggerError::config(
                    LOG_LEVEL_ENV,
                    format!("expected one of trace, debug, info, warn, error, fatal; got '{}'", level),
                )
            })?,
            None => LogLevel::Info,
        };
        let log_format = lookup(LOG_FORMAT_ENV)
            .map(|format| parse_log_format(&format))
            .transpose()?;

        Ok(Self::detect_deployment(&lookup, min_level, log_format))
    }

    fn detect_deployment<F>(lookup: F, min_level: LogLevel, log_format: Option<OutputFormat>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lambda_function = lookup(LAMBDA_FUNCTION_NAME_ENV);
        let deployed = lookup(RUNNING_IN_CONTAINER_ENV).as_deref() == Some("true")
            || lookup(EKS_ENV).as_deref() == Some("true")
            || lambda_function.is_some();

        Self {
            min_level,
            log_format,
            deployed,
            component_fallback: lambda_function,
            use_colors: !deployed,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_log_format(mut self, format: OutputFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    #[must_use]
    pub fn with_deployed(mut self, deployed: bool) -> Self {
        self.deployed = deployed;
        self
    }

    #[must_use]
    pub fn with_component_fallback(mut self, component: impl Into<String>) -> Self {
        self.component_fallback = Some(component.into());
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// JSON when requested or deployed, text otherwise
    pub fn output_format(&self) -> OutputFormat {
        if self.log_format == Some(OutputFormat::Json) || self.deployed {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Minimum level for [`DEPENDENCY_COMPONENTS`]
    pub fn dependency_level(&self) -> LogLevel {
        if self.deployed {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }

    /// Builder preloaded with this configuration, without enrichers or writer
    pub fn builder(&self) -> LoggerBuilder {
        let mut builder = Logger::builder()
            .min_level(self.min_level)
            .output_format(self.output_format())
            .colors(self.use_colors);

        for component in DEPENDENCY_COMPONENTS {
            builder = builder.level_override(component, self.dependency_level());
        }

        match &self.component_fallback {
            Some(component) => builder.component_fallback(component.clone()),
            None => builder,
        }
    }
}

fn parse_log_format(value: &str) -> Result<OutputFormat> {
    match value.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(LoggerError::config(
            LOG_FORMAT_ENV,
            format!("expected text or json; got '{}'", value),
        )),
    }
}

/// Logger configured from the process environment, with the standard
/// app/environment/infra enrichers, writing to stdout
///
/// `default_version` is reported when `SERVICE_VERSION` is unset.
pub fn logger_from_env(default_version: Option<&str>) -> Logger {
    let config = LoggerConfig::from_env();
    let mut builder = config.builder();
    for enricher in standard_enrichers(process_env, default_version) {
        builder = builder.boxed_enricher(enricher);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::test_env::lookup;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert_eq!(config.log_format, None);
        assert!(!config.deployed);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.dependency_level(), LogLevel::Info);
        assert!(config.component_fallback.is_none());
    }

    #[test]
    fn test_level_parsing() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOG_LEVEL", "DEBUG")]));
        assert_eq!(config.min_level, LogLevel::Debug);

        let config = LoggerConfig::from_lookup(lookup(&[("LOG_LEVEL", "verbose")]));
        assert_eq!(config.min_level, LogLevel::Info);
    }

    #[test]
    fn test_format_parsing() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOG_FORMAT", "Json")]));
        assert_eq!(config.log_format, Some(OutputFormat::Json));
        assert_eq!(config.output_format(), OutputFormat::Json);

        let config = LoggerConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")]));
        assert_eq!(config.log_format, None);
    }

    #[test]
    fn test_strict_parse_rejects_unknown_values() {
        let err = LoggerConfig::try_from_lookup(lookup(&[("LOG_LEVEL", "verbose")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { ref component, .. } if component == "LOG_LEVEL"));
        assert!(err.to_string().contains("'verbose'"));

        let err = LoggerConfig::try_from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { ref component, .. } if component == "LOG_FORMAT"));
    }

    #[test]
    fn test_strict_parse_accepts_valid_values() {
        let config = LoggerConfig::try_from_lookup(lookup(&[
            ("LOG_LEVEL", "Warn"),
            ("LOG_FORMAT", "JSON"),
            ("EKS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.min_level, LogLevel::Warn);
        assert_eq!(config.log_format, Some(OutputFormat::Json));
        assert!(config.deployed);
    }

    #[test]
    fn test_lenient_parse_keeps_valid_settings() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOG_LEVEL", "error"), ("LOG_FORMAT", "xml")]));
        assert_eq!(config.min_level, LogLevel::Error);
        assert_eq!(config.log_format, None);
    }

    #[test]
    fn test_deployment_forces_json() {
        for vars in [
            [("RUNNING_IN_CONTAINER", "true"), ("LOG_FORMAT", "text")],
            [("EKS", "true"), ("LOG_FORMAT", "text")],
            [("AWS_LAMBDA_FUNCTION_NAME", "fn"), ("LOG_FORMAT", "text")],
        ] {
            let config = LoggerConfig::from_lookup(lookup(&vars));
            assert!(config.deployed);
            assert_eq!(config.output_format(), OutputFormat::Json);
            assert_eq!(config.dependency_level(), LogLevel::Warn);
            assert!(!config.use_colors);
        }
    }

    #[test]
    fn test_lambda_name_is_component_fallback() {
        let config = LoggerConfig::from_lookup(lookup(&[("AWS_LAMBDA_FUNCTION_NAME", "orders-fn")]));
        assert_eq!(config.component_fallback.as_deref(), Some("orders-fn"));
    }
}

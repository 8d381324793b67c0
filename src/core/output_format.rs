//! Output format selection for the logger front end
//!
//! - Json: canonical JSON line, for deployed services
//! - Text: human-readable line for local development

use super::error::Result;
use super::json_formatter::{is_reserved_property, JsonFormatter, SOURCE_CONTEXT_PROPERTY};
use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use super::value::StructuredValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] api::orders - Order {Id} stored Id=7`;
    /// the `component - ` part is left out when the event has no component
    #[default]
    Text,

    /// One JSON document per line, see [`JsonFormatter`]
    Json,
}

impl OutputFormat {
    /// Render `event` as a complete newline-terminated line
    pub fn format(&self, event: &LogEvent, json: &JsonFormatter, use_colors: bool) -> Result<String> {
        match self {
            OutputFormat::Json => json.format_line(event),
            OutputFormat::Text => format_text(event, json, use_colors),
        }
    }
}

fn format_text(event: &LogEvent, json: &JsonFormatter, use_colors: bool) -> Result<String> {
    let values = json.value_formatter();
    let component = match event.property(SOURCE_CONTEXT_PROPERTY) {
        Some(StructuredValue::Scalar(scalar)) => scalar.to_plain_string(),
        Some(other) => Some(values.to_json_string(other)?),
        None => json.component_fallback().map(str::to_string),
    };

    let mut line = format!(
        "[{}] [{}] ",
        TimestampFormat::Iso8601.format(&event.timestamp),
        level_label(event, use_colors)
    );
    if let Some(component) = &component {
        line.push_str(&sanitize(component));
        line.push_str(" - ");
    }
    line.push_str(&sanitize(&event.message_template));

    for (name, value) in event.properties.iter() {
        if is_reserved_property(name) {
            continue;
        }
        let rendered = match value {
            StructuredValue::Scalar(scalar) => scalar.to_string(),
            other => values.to_json_string(other)?,
        };
        line.push(' ');
        line.push_str(name);
        line.push('=');
        line.push_str(&sanitize(&rendered));
    }

    if let Some(error) = &event.error {
        let chain: Vec<String> = error
            .chain()
            .map(|e| format!("{}: {}", e.type_name(), e.message()))
            .collect();
        line.push_str(" error=\"");
        line.push_str(&sanitize(&chain.join(" <- ")));
        line.push('"');
    }

    line.push('\n');
    Ok(line)
}

#[cfg(feature = "console")]
fn level_label(event: &LogEvent, use_colors: bool) -> String {
    use colored::Colorize;

    let label = format!("{:5}", event.level.to_str());
    if use_colors {
        label.color(event.level.color_code()).to_string()
    } else {
        label
    }
}

#[cfg(not(feature = "console"))]
fn level_label(event: &LogEvent, _use_colors: bool) -> String {
    format!("{:5}", event.level.to_str())
}

/// Escape line breaks so one event stays on one line
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

//! Canonical JSON line formatter for log events
//!
//! Field order is fixed: `type`, `timestamp`, `level`, `levelNumber`,
//! `message`, then the optional `app`, `environment`, `component`, `infra`,
//! `req`, `res`, `err`, `correlationId` and `properties`.

use super::correlation::resolve_correlation_id;
use super::error::Result;
use super::error_formatter::ErrorJson;
use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use super::value::StructuredValue;
use super::value_formatter::ValueFormatter;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;

pub const APP_PROPERTY: &str = "app";
pub const ENVIRONMENT_PROPERTY: &str = "environment";
pub const INFRA_PROPERTY: &str = "infra";
pub const RESPONSE_PROPERTY: &str = "res";
pub const SOURCE_CONTEXT_PROPERTY: &str = "SourceContext";

/// Property names never written into the `properties` bag
pub const RESERVED_PROPERTIES: [&str; 9] = [
    APP_PROPERTY,
    ENVIRONMENT_PROPERTY,
    INFRA_PROPERTY,
    super::correlation::REQUEST_PROPERTY,
    RESPONSE_PROPERTY,
    SOURCE_CONTEXT_PROPERTY,
    super::correlation::REQUEST_ID_PROPERTY,
    "RequestPath",
    "ConnectionId",
];

pub fn is_reserved_property(name: &str) -> bool {
    RESERVED_PROPERTIES.contains(&name)
}

/// Serializes [`LogEvent`]s to single JSON lines
///
/// Stateless apart from its settings, so one instance can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use structured_log_json::core::{JsonFormatter, LogEvent, LogLevel};
/// use chrono::{TimeZone, Utc};
///
/// let event = LogEvent::new(LogLevel::Info, "test")
///     .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
///
/// let line = JsonFormatter::new().format_line(&event).unwrap();
/// assert_eq!(
///     line,
///     "{\"type\":\"log\",\"timestamp\":\"2025-01-01T00:00:00.0000000Z\",\"level\":\"info\",\"levelNumber\":30,\"message\":\"test\"}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    value_formatter: ValueFormatter,
    component_fallback: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value_formatter(mut self, value_formatter: ValueFormatter) -> Self {
        self.value_formatter = value_formatter;
        self
    }

    /// Component name used when an event has no `SourceContext`
    #[must_use]
    pub fn with_component_fallback(mut self, component: impl Into<String>) -> Self {
        self.component_fallback = Some(component.into());
        self
    }

    pub fn value_formatter(&self) -> &ValueFormatter {
        &self.value_formatter
    }

    pub fn component_fallback(&self) -> Option<&str> {
        self.component_fallback.as_deref()
    }

    /// One JSON document followed by exactly one `\n`
    pub fn format_line(&self, event: &LogEvent) -> Result<String> {
        let mut line = serde_json::to_string(&EventJson {
            formatter: self,
            event,
        })?;
        line.push('\n');
        Ok(line)
    }

    /// Write the line for `event` to `writer` in a single `write_all`
    pub fn format<W: Write + ?Sized>(&self, event: &LogEvent, writer: &mut W) -> Result<()> {
        let line = self.format_line(event)?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }
}

struct EventJson<'a> {
    formatter: &'a JsonFormatter,
    event: &'a LogEvent,
}

impl<'a> EventJson<'a> {
    fn serialize_property<M: SerializeMap>(
        &self,
        map: &mut M,
        field: &'static str,
        property: &str,
    ) -> std::result::Result<(), M::Error> {
        match self.event.property(property) {
            Some(value) => map.serialize_entry(field, &self.formatter.value_formatter.view(value)),
            None => Ok(()),
        }
    }

    fn serialize_component<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        match (
            self.event.property(SOURCE_CONTEXT_PROPERTY),
            self.formatter.component_fallback(),
        ) {
            (Some(source_context), _) => map.serialize_entry(
                "component",
                &self.formatter.value_formatter.view(source_context),
            ),
            (None, Some(fallback)) => map.serialize_entry("component", fallback),
            (None, None) => Ok(()),
        }
    }
}

impl Serialize for EventJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let event = self.event;
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("type", "log")?;
        map.serialize_entry("timestamp", &TimestampFormat::RoundTrip.format(&event.timestamp))?;
        map.serialize_entry("level", event.level.name())?;
        map.serialize_entry("levelNumber", &event.level.rank())?;
        map.serialize_entry("message", &event.message_template)?;

        self.serialize_property(&mut map, "app", APP_PROPERTY)?;
        self.serialize_property(&mut map, "environment", ENVIRONMENT_PROPERTY)?;
        self.serialize_component(&mut map)?;
        self.serialize_property(&mut map, "infra", INFRA_PROPERTY)?;
        self.serialize_property(&mut map, "req", super::correlation::REQUEST_PROPERTY)?;
        self.serialize_property(&mut map, "res", RESPONSE_PROPERTY)?;

        if let Some(error) = &event.error {
            map.serialize_entry("err", &ErrorJson(error))?;
        }

        if let Some(correlation_id) = resolve_correlation_id(event) {
            map.serialize_entry("correlationId", &correlation_id)?;
        }

        let bag = PropertyBagJson {
            formatter: &self.formatter.value_formatter,
            event,
        };
        if bag.remaining().next().is_some() {
            map.serialize_entry("properties", &bag)?;
        }

        map.end()
    }
}

struct PropertyBagJson<'a> {
    formatter: &'a ValueFormatter,
    event: &'a LogEvent,
}

impl<'a> PropertyBagJson<'a> {
    fn remaining(&self) -> impl Iterator<Item = (&'a str, &'a StructuredValue)> {
        let event: &'a LogEvent = self.event;
        event
            .properties
            .iter()
            .filter(|(name, _)| !is_reserved_property(name))
    }
}

impl Serialize for PropertyBagJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.remaining() {
            map.serialize_entry(name, &self.formatter.view(value))?;
        }
        map.end()
    }
}

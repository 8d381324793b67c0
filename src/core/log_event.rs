//! Log event structure

use super::error_info::ErrorInfo;
use super::log_level::LogLevel;
use super::value::StructuredValue;
use chrono::{DateTime, Utc};

/// Property bag with unique names, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, StructuredValue)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced property keeps its original position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<StructuredValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Insert only when no property with this name exists
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<StructuredValue>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, value.into()));
        }
    }

    pub fn get(&self, name: &str) -> Option<&StructuredValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<StructuredValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructuredValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One emitted log record
///
/// `message_template` is the raw template text; it is never interpolated.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message_template: String,
    pub properties: Properties,
    pub error: Option<ErrorInfo>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message_template: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message_template: message_template.into(),
            properties: Properties::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<StructuredValue>,
    ) -> Self {
        self.properties.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<StructuredValue>) {
        self.properties.insert(name, value);
    }

    pub fn add_property_if_absent(
        &mut self,
        name: impl Into<String>,
        value: impl Into<StructuredValue>,
    ) {
        self.properties.insert_if_absent(name, value);
    }

    pub fn property(&self, name: &str) -> Option<&StructuredValue> {
        self.properties.get(name)
    }
}

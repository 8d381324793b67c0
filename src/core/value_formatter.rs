//! JSON rendering of [`StructuredValue`]s

use super::error::Result;
use super::value::{StructuredValue, Structure};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::io::Write;

/// Default key under which a structure's type tag is written
pub const DEFAULT_TYPE_TAG_NAME: &str = "$type";

/// Renders structured values as compact JSON
///
/// Structures become objects in field order (duplicate names included),
/// dictionaries become objects keyed by the key's string form, sequences
/// become arrays.
///
/// # Example
///
/// ```
/// use structured_log_json::core::{Structure, ValueFormatter};
///
/// let value = Structure::new().with_field("name", "svc").with_field("port", 8080).into();
/// let json = ValueFormatter::new().to_json_string(&value).unwrap();
/// assert_eq!(json, r#"{"name":"svc","port":8080}"#);
/// ```
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    type_tag_name: String,
}

impl ValueFormatter {
    pub fn new() -> Self {
        Self {
            type_tag_name: DEFAULT_TYPE_TAG_NAME.to_string(),
        }
    }

    /// Use a different key for structure type tags
    #[must_use]
    pub fn with_type_tag_name(mut self, name: impl Into<String>) -> Self {
        self.type_tag_name = name.into();
        self
    }

    pub fn type_tag_name(&self) -> &str {
        &self.type_tag_name
    }

    /// Append the JSON text for `value` to `writer`
    pub fn format<W: Write + ?Sized>(&self, value: &StructuredValue, writer: &mut W) -> Result<()> {
        serde_json::to_writer(writer, &self.view(value))?;
        Ok(())
    }

    pub fn to_json_string(&self, value: &StructuredValue) -> Result<String> {
        Ok(serde_json::to_string(&self.view(value))?)
    }

    /// Serializable view of `value`, for embedding in a larger document
    pub fn view<'a>(&'a self, value: &'a StructuredValue) -> JsonValue<'a> {
        JsonValue {
            value,
            type_tag_name: &self.type_tag_name,
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`StructuredValue`] paired with the formatter settings it renders with
#[derive(Debug, Clone, Copy)]
pub struct JsonValue<'a> {
    value: &'a StructuredValue,
    type_tag_name: &'a str,
}

impl<'a> JsonValue<'a> {
    fn nested(&self, value: &'a StructuredValue) -> Self {
        Self {
            value,
            type_tag_name: self.type_tag_name,
        }
    }

    fn serialize_structure<S: Serializer>(
        &self,
        structure: &'a Structure,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(tag) = structure.type_tag() {
            map.serialize_entry(self.type_tag_name, tag)?;
        }
        for (name, value) in structure.fields() {
            map.serialize_entry(name, &self.nested(value))?;
        }
        map.end()
    }
}

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.value {
            StructuredValue::Scalar(scalar) => scalar.serialize(serializer),
            StructuredValue::Structure(structure) => {
                self.serialize_structure(structure, serializer)
            }
            StructuredValue::Dictionary(dictionary) => {
                let mut map = serializer.serialize_map(Some(dictionary.len()))?;
                for (key, value) in dictionary.entries() {
                    map.serialize_entry(key.key_text().as_ref(), &self.nested(value))?;
                }
                map.end()
            }
            StructuredValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.nested(item))?;
                }
                seq.end()
            }
        }
    }
}

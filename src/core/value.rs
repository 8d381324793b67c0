//! Structured property values
//!
//! Every property attached to a [`LogEvent`](super::LogEvent) is one of four
//! variants: a scalar, an ordered structure of named fields, a dictionary, or
//! a sequence. The formatter matches on them exhaustively.

use serde::ser::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Primitive value carried by [`StructuredValue::Scalar`]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Opaque object already rendered to text; written as a JSON string
    Printable(String),
}

impl ScalarValue {
    /// Wrap anything `Display` as a printable scalar
    pub fn printable(value: impl fmt::Display) -> Self {
        ScalarValue::Printable(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// String form of a non-null scalar
    pub fn to_plain_string(&self) -> Option<String> {
        match self {
            ScalarValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Text used when this scalar is a dictionary key
    pub(crate) fn key_text(&self) -> Cow<'_, str> {
        match self {
            ScalarValue::String(s) | ScalarValue::Printable(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "null"),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::UInt(u) => write!(f, "{}", u),
            ScalarValue::Float(fl) => write!(f, "{}", fl),
            ScalarValue::String(s) | ScalarValue::Printable(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScalarValue::Null => serializer.serialize_unit(),
            ScalarValue::Bool(b) => serializer.serialize_bool(*b),
            ScalarValue::Int(i) => serializer.serialize_i64(*i),
            ScalarValue::UInt(u) => serializer.serialize_u64(*u),
            ScalarValue::Float(fl) if fl.is_nan() => serializer.serialize_str("NaN"),
            ScalarValue::Float(fl) if fl.is_infinite() => {
                serializer.serialize_str(if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ScalarValue::Float(fl) => serializer.serialize_f64(*fl),
            ScalarValue::String(s) | ScalarValue::Printable(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered named fields, optionally tagged with a type name
///
/// Names are not required to be unique. Lookups return the first match,
/// serialization emits every field in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    type_tag: Option<String>,
    fields: Vec<(String, StructuredValue)>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<StructuredValue>,
    {
        self.push_field(name, value);
        self
    }

    pub fn push_field<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<StructuredValue>,
    {
        self.fields.push((name.into(), value.into()));
    }

    /// First field with the given name
    pub fn field(&self, name: &str) -> Option<&StructuredValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, StructuredValue)] {
        &self.fields
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }
}

/// Mapping from scalar keys to values; inserting an existing key replaces it in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(ScalarValue, StructuredValue)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<ScalarValue>,
        V: Into<StructuredValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<ScalarValue>,
        V: Into<StructuredValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored under the string key `key` (exact, case-sensitive)
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, ScalarValue::String(s) if s == key))
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> &[(ScalarValue, StructuredValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value of a log event property
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    Scalar(ScalarValue),
    Structure(Structure),
    Dictionary(Dictionary),
    Sequence(Vec<StructuredValue>),
}

impl StructuredValue {
    pub fn null() -> Self {
        StructuredValue::Scalar(ScalarValue::Null)
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            StructuredValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            StructuredValue::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            StructuredValue::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }
}

impl From<ScalarValue> for StructuredValue {
    fn from(scalar: ScalarValue) -> Self {
        StructuredValue::Scalar(scalar)
    }
}

impl From<Structure> for StructuredValue {
    fn from(structure: Structure) -> Self {
        StructuredValue::Structure(structure)
    }
}

impl From<Dictionary> for StructuredValue {
    fn from(dictionary: Dictionary) -> Self {
        StructuredValue::Dictionary(dictionary)
    }
}

impl From<Vec<StructuredValue>> for StructuredValue {
    fn from(items: Vec<StructuredValue>) -> Self {
        StructuredValue::Sequence(items)
    }
}

impl<T: Into<StructuredValue>> From<Option<T>> for StructuredValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(StructuredValue::null, Into::into)
    }
}

macro_rules! impl_scalar_from {
    (cast $($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    ScalarValue::$variant(value as $target)
                }
            }

            impl From<$ty> for StructuredValue {
                fn from(value: $ty) -> Self {
                    StructuredValue::Scalar(ScalarValue::from(value))
                }
            }
        )*
    };
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    ScalarValue::$variant(<$target>::from(value))
                }
            }

            impl From<$ty> for StructuredValue {
                fn from(value: $ty) -> Self {
                    StructuredValue::Scalar(ScalarValue::from(value))
                }
            }
        )*
    };
}

impl_scalar_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => String as String,
    &str => String as String,
}

// Pointer-sized integers fit in 64 bits on every supported target.
impl_scalar_from! {
    cast
    usize => UInt as u64,
    isize => Int as i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_lookup_is_first_wins() {
        let structure = Structure::new()
            .with_field("headers", "first")
            .with_field("headers", "second");

        assert_eq!(
            structure.field("headers"),
            Some(&StructuredValue::from("first"))
        );
        assert_eq!(structure.fields().len(), 2);
        assert!(structure.field("missing").is_none());
    }

    #[test]
    fn test_dictionary_insert_replaces_in_place() {
        let mut dict = Dictionary::new()
            .with_entry("a", 1)
            .with_entry("b", 2);
        dict.insert("a", 3);

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.entries()[0].0, ScalarValue::from("a"));
        assert_eq!(dict.get("a"), Some(&StructuredValue::from(3)));
    }

    #[test]
    fn test_dictionary_get_is_case_sensitive() {
        let dict = Dictionary::new().with_entry("x-request-id", "abc");
        assert!(dict.get("x-request-id").is_some());
        assert!(dict.get("X-Request-Id").is_none());
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(ScalarValue::from("abc").to_plain_string().as_deref(), Some("abc"));
        assert_eq!(ScalarValue::from(42).to_plain_string().as_deref(), Some("42"));
        assert_eq!(ScalarValue::from(true).to_plain_string().as_deref(), Some("true"));
        assert!(ScalarValue::Null.to_plain_string().is_none());
    }

    #[test]
    fn test_pointer_sized_integers() {
        let items = vec!["a", "b", "c"];
        assert_eq!(
            StructuredValue::from(items.len()),
            StructuredValue::Scalar(ScalarValue::UInt(3))
        );
        assert_eq!(ScalarValue::from(-2isize), ScalarValue::Int(-2));
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<&str> = None;
        assert_eq!(StructuredValue::from(none), StructuredValue::null());
        assert_eq!(StructuredValue::from(Some(7u16)), StructuredValue::from(7u64));
    }

    #[test]
    fn test_scalar_serialization() {
        let cases = [
            (ScalarValue::Null, "null"),
            (ScalarValue::from(false), "false"),
            (ScalarValue::from(-5), "-5"),
            (ScalarValue::from(u64::MAX), "18446744073709551615"),
            (ScalarValue::from(1.5), "1.5"),
            (ScalarValue::Float(f64::NAN), "\"NaN\""),
            (ScalarValue::Float(f64::NEG_INFINITY), "\"-Infinity\""),
            (ScalarValue::from("a\"b"), "\"a\\\"b\""),
            (ScalarValue::printable(std::net::Ipv4Addr::LOCALHOST), "\"127.0.0.1\""),
        ];
        for (scalar, expected) in cases {
            assert_eq!(serde_json::to_string(&scalar).unwrap(), expected);
        }
    }
}

//! JSON rendering of error chains
//!
//! The outer error becomes an object with `type`, `message`, `stack`,
//! `source` and `code`. When it wraps other errors, an `innerErrors` array
//! follows with one object per wrapped error, immediate cause first.

use super::error::Result;
use super::error_info::ErrorInfo;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;

/// Append the `err` object for `error` to `writer`
pub fn format_error<W: Write + ?Sized>(error: &ErrorInfo, writer: &mut W) -> Result<()> {
    serde_json::to_writer(writer, &ErrorJson(error))?;
    Ok(())
}

/// Outer error object including `innerErrors`
pub(crate) struct ErrorJson<'a>(pub(crate) &'a ErrorInfo);

/// One error's own fields, without its chain
struct ErrorFieldsJson<'a>(&'a ErrorInfo);

struct InnerErrorsJson<'a>(&'a ErrorInfo);

fn serialize_fields<M: SerializeMap>(map: &mut M, error: &ErrorInfo) -> std::result::Result<(), M::Error> {
    map.serialize_entry("type", error.type_name())?;
    map.serialize_entry("message", error.message())?;

    // Reading the trace can fail; the event is still written, just without `stack`.
    if let Ok(Some(stack)) = error.stack_trace() {
        map.serialize_entry("stack", &stack)?;
    }

    if let Some(source) = error.source() {
        map.serialize_entry("source", source)?;
    }

    map.serialize_entry("code", &error.code_hex())
}

impl Serialize for ErrorJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_fields(&mut map, self.0)?;
        if let Some(inner) = self.0.inner() {
            map.serialize_entry("innerErrors", &InnerErrorsJson(inner))?;
        }
        map.end()
    }
}

impl Serialize for ErrorFieldsJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_fields(&mut map, self.0)?;
        map.end()
    }
}

impl Serialize for InnerErrorsJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.chain().map(ErrorFieldsJson))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::error_info::StackTrace;

    fn render(error: &ErrorInfo) -> String {
        let mut out = Vec::new();
        format_error(error, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_error_field_order() {
        let error = ErrorInfo::new("TestException", "test-message")
            .with_stack("test-stack")
            .with_source("test-source")
            .with_code(42);

        assert_eq!(
            render(&error),
            r#"{"type":"TestException","message":"test-message","stack":"test-stack","source":"test-source","code":"0000002A"}"#
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let error = ErrorInfo::new("E", "m");
        assert_eq!(render(&error), r#"{"type":"E","message":"m","code":"00000000"}"#);
    }

    #[test]
    fn test_failing_stack_read_is_omitted() {
        let error = ErrorInfo::new("E", "m")
            .with_stack_trace(StackTrace::deferred(|| Err(LoggerError::stack_trace("denied"))))
            .with_source("lib");
        assert_eq!(
            render(&error),
            r#"{"type":"E","message":"m","source":"lib","code":"00000000"}"#
        );
    }

    #[test]
    fn test_failing_inner_stack_read_only_affects_that_entry() {
        let error = ErrorInfo::new("A", "root").with_stack("a-stack").with_inner(
            ErrorInfo::new("B", "inner")
                .with_stack_trace(StackTrace::deferred(|| Err(LoggerError::stack_trace("denied"))))
                .with_inner(ErrorInfo::new("C", "innermost").with_stack("c-stack")),
        );

        let parsed: serde_json::Value = serde_json::from_str(&render(&error)).unwrap();
        assert_eq!(parsed["stack"], "a-stack");

        let inner = parsed["innerErrors"].as_array().unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0]["message"], "inner");
        assert!(inner[0].get("stack").is_none());
        assert_eq!(inner[0]["code"], "00000000");
        assert_eq!(inner[1]["stack"], "c-stack");
    }

    #[test]
    fn test_inner_errors_flattened_in_order() {
        let error = ErrorInfo::new("A", "root").with_inner(
            ErrorInfo::new("B", "inner")
                .with_stack("b-stack")
                .with_inner(ErrorInfo::new("C", "innermost").with_code(1)),
        );

        let parsed: serde_json::Value = serde_json::from_str(&render(&error)).unwrap();
        assert_eq!(parsed["message"], "root");

        let inner = parsed["innerErrors"].as_array().unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0]["message"], "inner");
        assert_eq!(inner[0]["stack"], "b-stack");
        assert_eq!(inner[1]["message"], "innermost");
        assert_eq!(inner[1]["code"], "00000001");
        assert!(inner[0].get("innerErrors").is_none());
    }
}

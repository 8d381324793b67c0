//! Request and response snapshots
//!
//! Framework-neutral builders for the `req` and `res` properties. HTTP
//! middleware fills a [`RequestSnapshot`] from the incoming request, attaches
//! it to every event logged while handling it, and adds a
//! [`ResponseSnapshot`] to the final "handled request" event.

use crate::core::correlation::{REQUEST_ID_HEADER, REQUEST_ID_PROPERTY, REQUEST_PROPERTY};
use crate::core::json_formatter::RESPONSE_PROPERTY;
use crate::core::{Dictionary, LogEvent, Structure, StructuredValue};

/// Headers never copied into a snapshot (compared lowercase)
pub const SENSITIVE_HEADERS: [&str; 3] = ["cookie", "authorization", "x-forwarded-auth"];

/// Incoming request as it appears in the `req` property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub method: String,
    pub path: String,
    pub query_string: Option<String>,
    /// Lowercased names; repeated headers joined with `,`
    pub headers: Vec<(String, String)>,
    pub referer: Option<String>,
    pub client_ip: Option<String>,
}

impl RequestSnapshot {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
        self.query_string = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    /// Add headers, dropping sensitive ones; `referer` is also captured on its own
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.add_header(name.as_ref(), value.into());
        }
        self
    }

    fn add_header(&mut self, name: &str, value: String) {
        let name = name.to_lowercase();
        if SENSITIVE_HEADERS.contains(&name.as_str()) {
            return;
        }
        if name == "referer" && self.referer.is_none() {
            self.referer = Some(value.clone());
        }
        match self.headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => self.headers.push((name, value)),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the `x-request-id` header
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    pub fn to_value(&self) -> StructuredValue {
        let headers = self
            .headers
            .iter()
            .fold(Dictionary::new(), |dict, (name, value)| {
                dict.with_entry(name.as_str(), value.as_str())
            });

        Structure::new()
            .with_field("method", self.method.as_str())
            .with_field("path", self.path.as_str())
            .with_field("queryString", self.query_string.as_deref())
            .with_field("headers", headers)
            .with_field("referer", self.referer.as_deref())
            .with_field("clientIp", self.client_ip.as_deref())
            .into()
    }

    /// Attach `req` and, when the header is present, `RequestId`
    pub fn apply_to(&self, event: &mut LogEvent) {
        event.add_property(REQUEST_PROPERTY, self.to_value());
        if let Some(request_id) = self.request_id() {
            event.add_property(REQUEST_ID_PROPERTY, request_id);
        }
    }
}

/// Outcome of a handled request as it appears in the `res` property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseSnapshot {
    pub duration_ms: u64,
    pub status_code: u16,
}

impl ResponseSnapshot {
    pub fn new(duration_ms: u64, status_code: u16) -> Self {
        Self {
            duration_ms,
            status_code,
        }
    }

    pub fn to_value(&self) -> StructuredValue {
        Structure::new()
            .with_field("durationMs", self.duration_ms)
            .with_field("statusCode", self.status_code)
            .into()
    }

    pub fn apply_to(&self, event: &mut LogEvent) {
        event.add_property(RESPONSE_PROPERTY, self.to_value());
    }
}

/// Whether a path is a health/status endpoint (`/status/` anywhere, any case)
pub fn is_status_endpoint(path: &str) -> bool {
    path.to_lowercase().contains("/status/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{resolve_correlation_id, JsonFormatter, LogLevel, ValueFormatter};

    fn snapshot() -> RequestSnapshot {
        RequestSnapshot::new("GET", "/hello/world")
            .with_query_string("?foo=42")
            .with_client_ip("1.1.1.1")
            .with_headers([
                ("X-Test-Header-Name", "x-test-header-value"),
                ("Authorization", "Bearer secret"),
                ("Cookie", "session=1"),
                ("x-request-id", "test-request-id"),
                ("Referer", "https://example.com"),
            ])
    }

    #[test]
    fn test_request_value_shape() {
        let json = ValueFormatter::new().to_json_string(&snapshot().to_value()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"method":"GET","path":"/hello/world","queryString":"?foo=42","#,
                r#""headers":{"x-test-header-name":"x-test-header-value","x-request-id":"test-request-id","referer":"https://example.com"},"#,
                r#""referer":"https://example.com","clientIp":"1.1.1.1"}"#
            )
        );
    }

    #[test]
    fn test_sensitive_headers_dropped() {
        let snapshot = snapshot();
        assert!(snapshot.header("authorization").is_none());
        assert!(snapshot.header("cookie").is_none());
        let json = ValueFormatter::new().to_json_string(&snapshot.to_value()).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_repeated_headers_joined() {
        let snapshot = RequestSnapshot::new("GET", "/")
            .with_headers([("Accept", "text/html"), ("accept", "application/json")]);
        assert_eq!(snapshot.header("ACCEPT"), Some("text/html,application/json"));
    }

    #[test]
    fn test_missing_optional_fields_are_null() {
        let json = ValueFormatter::new()
            .to_json_string(&RequestSnapshot::new("POST", "/x").to_value())
            .unwrap();
        assert_eq!(
            json,
            r#"{"method":"POST","path":"/x","queryString":null,"headers":{},"referer":null,"clientIp":null}"#
        );
    }

    #[test]
    fn test_apply_to_feeds_correlation_id() {
        let mut event = LogEvent::new(LogLevel::Info, "Handled request {PathValue}");
        snapshot().apply_to(&mut event);
        ResponseSnapshot::new(42, 200).apply_to(&mut event);

        assert_eq!(resolve_correlation_id(&event).as_deref(), Some("test-request-id"));

        let line = JsonFormatter::new().format_line(&event).unwrap();
        assert!(line.contains(r#""res":{"durationMs":42,"statusCode":200}"#));
        assert!(!line.contains("\"properties\""));
    }

    #[test]
    fn test_status_endpoint() {
        assert!(is_status_endpoint("/api/Status/health"));
        assert!(!is_status_endpoint("/api/statuses"));
    }
}

//! Correlation id lookup
//!
//! A request id can arrive inside the captured request snapshot
//! (`req.headers["x-request-id"]`) or as a top-level `RequestId` property
//! attached by middleware. Either path alone is enough.

use super::log_event::LogEvent;
use super::value::StructuredValue;

pub const REQUEST_PROPERTY: &str = "req";
pub const REQUEST_ID_PROPERTY: &str = "RequestId";
pub const HEADERS_FIELD: &str = "headers";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for `event`; the request header wins over `RequestId`
pub fn resolve_correlation_id(event: &LogEvent) -> Option<String> {
    from_request_headers(event).or_else(|| from_request_id_property(event))
}

fn from_request_headers(event: &LogEvent) -> Option<String> {
    let request = event.property(REQUEST_PROPERTY)?.as_structure()?;
    let headers = request.field(HEADERS_FIELD)?.as_dictionary()?;
    headers
        .get(REQUEST_ID_HEADER)?
        .as_scalar()?
        .to_plain_string()
}

fn from_request_id_property(event: &LogEvent) -> Option<String> {
    match event.property(REQUEST_ID_PROPERTY)? {
        StructuredValue::Scalar(scalar) => scalar.to_plain_string(),
        _ => None,
    }
}

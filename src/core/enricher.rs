//! Enricher trait for adding ambient properties to events

use super::log_event::LogEvent;

/// Adds properties to an event before it is formatted
///
/// Implementations should use [`LogEvent::add_property_if_absent`] so values
/// set explicitly by the caller win.
pub trait Enricher: Send + Sync {
    fn enrich(&self, event: &mut LogEvent);
}

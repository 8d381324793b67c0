//! Timestamp formatting utilities
//!
//! Log lines carry UTC instants. The JSON output uses the round-trip form
//! with seven fractional digits; the text console uses milliseconds.

use chrono::{DateTime, Timelike, Utc};

/// Timestamp format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Round-trip form with 100ns ticks: `2025-01-08T10:30:45.1234560Z`
    #[default]
    RoundTrip,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// # Examples
    ///
    /// ```
    /// use structured_log_json::core::TimestampFormat;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    /// assert_eq!(
    ///     TimestampFormat::RoundTrip.format(&instant),
    ///     "2025-01-01T00:00:00.0000000Z"
    /// );
    /// ```
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::RoundTrip => {
                // Leap seconds report nanos >= 1e9; keep the fraction to 7 digits.
                let ticks = (datetime.nanosecond() % 1_000_000_000) / 100;
                format!("{}.{:07}Z", datetime.format("%Y-%m-%dT%H:%M:%S"), ticks)
            }
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

//! Timestamp formatting utilities
//!
//! Records carry local time. The default pattern renders it with millisecond
//! precision and no zone, `2025-01-08 10:30:45.123`, in both outputs.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// strftime pattern of [`TimestampFormat::Default`]
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use duallog::core::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Default.format(&at), "2025-01-08 10:30:45.000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Zone-less local time with milliseconds: `2025-01-08 10:30:45.123`
    #[default]
    Default,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with milliseconds and the record's offset:
    /// `2025-01-08T10:30:45.123+09:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    ///
    /// Written as a JSON number in the structured output.
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a datetime according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Default => datetime.format(DEFAULT_TIMESTAMP_PATTERN).to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format a datetime as the value of the structured `time` field
    #[must_use]
    pub fn format_json<Tz>(&self, datetime: &DateTime<Tz>) -> serde_json::Value
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}

//! Rendering of service timestamps.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a service timestamp.
///
/// Accepts RFC 3339 (with offset) and naive ISO-8601, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format a service timestamp in local time, falling back to the raw text.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

//! Display helpers for chat messages.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const FALLBACK: &str = "Just now";

/// Formats an ISO-8601 timestamp as a local wall-clock time.
///
/// Unparseable timestamps render as "Just now".
pub fn format_timestamp(timestamp: &str) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Formats a timestamp in the given time zone.
///
/// Offset-qualified timestamps are converted; naive ones (as written by the
/// backend's `isoformat()`) are taken to already be in `tz`.
pub fn format_timestamp_in<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(tz).format("%-I:%M:%S %p").to_string();
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.format("%-I:%M:%S %p").to_string())
        .unwrap_or_else(|| FALLBACK.to_string())
}

//! Timestamp helpers shared by the cache and the response envelope

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as epoch milliseconds (the cache entry timestamp unit).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format epoch milliseconds as an ISO-8601 string with millisecond
/// precision (e.g. `2025-06-01T12:00:00.000Z`).
///
/// Out-of-range timestamps fall back to the Unix epoch rather than failing;
/// version strings are labels, not data.
pub fn iso_from_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an ISO-8601 string.
pub fn now_iso() -> String {
    iso_from_millis(now_millis())
}

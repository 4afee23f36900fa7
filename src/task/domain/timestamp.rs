//! Lenient parsing of service timestamps.
//!
//! The service writes wall-clock times without an offset (`2024-01-01 10:00`
//! for scheduled times, `2024-01-01 10:00:05` for execution times) and the
//! form submits `2024-01-01T10:00`. All of these are read as local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a service timestamp into local wall-clock time.
///
/// RFC 3339 values carrying an offset are converted to local time. Empty or
/// unparsable input yields `None`; this never fails.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

//! Submission timestamp normalization.
//!
//! Form exports carry timestamps in whatever shape the collecting system
//! produced: ISO 8601 with or without an offset (including the hours-only
//! `+00` form databases emit), space-separated datetimes,
//! US-style dates. Every value is normalized to a UTC instant; naive values
//! are taken to be UTC already. Anything that does not parse becomes `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::warn;

/// Datetime formats carrying an explicit offset.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Naive datetime formats, interpreted as UTC.
const DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
];

/// Date-only formats, interpreted as midnight UTC.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y", // US month-first
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Parse a submission timestamp into a UTC instant.
///
/// # Examples
///
/// ```
/// use encounter_transform::datetime::parse_timestamp;
///
/// let utc = parse_timestamp("2024-01-05T12:00:00+02:00").unwrap();
/// assert_eq!(utc.to_rfc3339(), "2024-01-05T10:00:00+00:00");
///
/// assert!(parse_timestamp("2024-01-05").is_some());
/// assert!(parse_timestamp("not a date").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(dt) = parse_with_offset(trimmed) {
        return Some(dt);
    }
    if let Some(dt) = expand_hour_offset(trimmed).and_then(|value| parse_with_offset(&value)) {
        return Some(dt);
    }

    let naive = strip_utc_designator(trimmed);
    parse_naive_datetime(naive).map(|dt| dt.and_utc())
}

fn parse_with_offset(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pad an hours-only offset: `10:00:00+00` → `10:00:00+00:00`.
///
/// Only applies when the offset follows the time part, so a date such as
/// `2024-01-05` is never mistaken for one with a `-05` offset.
fn expand_hour_offset(value: &str) -> Option<String> {
    let last_colon = value.rfind(':')?;
    let sign = value.len().checked_sub(3)?;
    if sign <= last_colon {
        return None;
    }
    let offset = value.get(sign..)?;
    let mut chars = offset.chars();
    let is_offset =
        matches!(chars.next(), Some('+' | '-')) && chars.all(|c| c.is_ascii_digit());
    is_offset.then(|| format!("{value}:00"))
}

/// Strip a trailing `Z` / `UTC` designator, leaving the naive part.
fn strip_utc_designator(value: &str) -> &str {
    if let Some(rest) = value.strip_suffix("UTC") {
        return rest.trim_end();
    }
    if let Some(rest) = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
    {
        return rest.trim_end();
    }
    value
}

fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Normalize a column of raw timestamps.
///
/// Output has the same length and order as the input. Values that are
/// present but unparseable are counted and reported once.
pub fn normalize_timestamps(values: &[Option<String>]) -> Vec<Option<DateTime<Utc>>> {
    let mut unparseable = 0usize;
    let normalized: Vec<Option<DateTime<Utc>>> = values
        .iter()
        .map(|value| {
            let raw = value.as_deref()?;
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                unparseable += 1;
            }
            parsed
        })
        .collect();
    if unparseable > 0 {
        warn!(
            unparseable,
            total = values.len(),
            "unparseable submission timestamps treated as missing"
        );
    }
    normalized
}

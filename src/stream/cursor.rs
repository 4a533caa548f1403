//! Cursor comparison and state merging

use crate::types::{JsonValue, Record, StreamState};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a cursor string as a point in time
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]+HH:MM`, naive date-times
/// (taken as UTC) and plain `YYYY-MM-DD` dates.
pub fn parse_cursor_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Order two cursor values
///
/// Numbers compare numerically, timestamps chronologically, other strings
/// lexicographically. Values of different kinds are unordered, and so is a
/// timestamp against a string that does not parse as one.
pub fn compare_cursor_values(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (JsonValue::String(x), JsonValue::String(y)) => {
            match (parse_cursor_timestamp(x), parse_cursor_timestamp(y)) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                (None, None) => Some(x.cmp(y)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// New state holding the greater of the stored and the record's cursor
///
/// A record without the cursor (or with a null one) leaves the stored value
/// in place; unordered values never replace it.
pub fn updated_cursor_state(cursor_field: &str, current: &StreamState, latest: &Record) -> StreamState {
    let stored = current.get(cursor_field).filter(|v| !v.is_null());
    let incoming = latest.get(cursor_field).filter(|v| !v.is_null());

    let winner = match (stored, incoming) {
        (Some(stored), Some(incoming)) => {
            if compare_cursor_values(incoming, stored) == Some(Ordering::Greater) {
                incoming
            } else {
                stored
            }
        }
        (Some(stored), None) => stored,
        (None, Some(incoming)) => incoming,
        (None, None) => return StreamState::new(),
    };

    let mut state = StreamState::new();
    state.insert(cursor_field.to_string(), winner.clone());
    state
}

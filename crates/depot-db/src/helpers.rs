//! Row-to-entity parsing helpers.
//!
//! Timestamps are stored as INTEGER epoch milliseconds so the
//! `last_updated` index orders and range-scans correctly. Optional TEXT
//! columns are NULL when unset; empty strings are treated as unset in both
//! directions.

use chrono::{DateTime, Utc};
use depot_core::enums::EventStatus;

use crate::error::DatabaseError;

/// Convert a timestamp to its stored form.
#[must_use]
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Parse a stored INTEGER millisecond column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value is outside chrono's range.
pub fn from_millis(ms: i64) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DatabaseError::Query(format!("Timestamp out of range: {ms}")))
}

/// Normalize an optional field before writing: empty strings become NULL.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Serialize an optional JSON payload for a TEXT column. `null` is stored as NULL.
#[must_use]
pub fn json_to_column(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .filter(|v| !v.is_null())
        .map(std::string::ToString::to_string)
}

/// Parse a status column. Never fails: unknown names become `EventStatus::Other`.
#[must_use]
pub fn parse_status(s: &str) -> EventStatus {
    EventStatus::parse(s)
}

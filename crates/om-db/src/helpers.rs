//! Row parsing and column encoding helpers.
//!
//! Timestamps are written with a fixed-width RFC 3339 form (millisecond
//! precision, `Z` suffix) so that string comparison in SQL orders them
//! chronologically. Reads also accept `SQLite`'s `datetime('now')` format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Format a timestamp for storage.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is neither RFC 3339 nor
/// `SQLite`'s `YYYY-MM-DD HH:MM:SS`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a `snake_case` serde enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and `""`.
///
/// `row.get::<String>(idx)` on a NULL column is an error, so nullable columns
/// go through `Option<String>`.
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

/// Decode an optional JSON column into a typed value.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not valid JSON for `T`.
pub fn parse_optional_json<T: DeserializeOwned>(
    s: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => serde_json::from_str(s)
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}"))),
        _ => Ok(None),
    }
}

/// Encode a value as a JSON TEXT parameter.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if serialization fails.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<libsql::Value, DatabaseError> {
    serde_json::to_string(value)
        .map(libsql::Value::Text)
        .map_err(|e| DatabaseError::Query(format!("Failed to encode JSON column: {e}")))
}

/// Optional TEXT parameter: `Some` binds the text, `None` binds SQL NULL.
#[must_use]
pub fn opt_text(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}

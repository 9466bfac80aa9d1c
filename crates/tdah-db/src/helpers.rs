//! Row-to-entity parsing helpers.
//!
//! Handles the datetime formats that end up in TEXT columns: `SQLite`'s
//! `datetime('now')`, ISO 8601 with a `T`, and RFC 3339 with an offset.

use chrono::{DateTime, NaiveDateTime};

use crate::error::DatabaseError;

/// Format used when this crate writes a timestamp.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a required TEXT column as a naive UTC timestamp.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if no supported format matches.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as a timestamp.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<NaiveDateTime>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

#[must_use]
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
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

/// Build a `LIKE ... ESCAPE '\'` pattern matching `needle` anywhere.
///
/// `%`, `_` and `\` in `needle` match literally.
#[must_use]
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Convert one libSQL value to JSON. Blobs become arrays of bytes.
#[must_use]
pub fn value_to_json(value: libsql::Value) -> serde_json::Value {
    match value {
        libsql::Value::Null => serde_json::Value::Null,
        libsql::Value::Integer(n) => serde_json::Value::from(n),
        libsql::Value::Real(f) => serde_json::Number::from_f64(f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        libsql::Value::Text(s) => serde_json::Value::String(s),
        libsql::Value::Blob(b) => serde_json::Value::from(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2026-02-09 14:30:00")]
    #[case("2026-02-09T14:30:00")]
    #[case("2026-02-09T14:30:00.000")]
    #[case("2026-02-09T14:30:00+00:00")]
    fn datetime_formats_parse(#[case] raw: &str) {
        let dt = parse_datetime(raw).unwrap();
        assert_eq!(format_datetime(&dt), "2026-02-09 14:30:00");
    }

    #[test]
    fn garbage_datetime_is_query_error() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[rstest]
    #[case("5a", "%5a%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("x\\y", "%x\\\\y%")]
    fn like_metacharacters_are_escaped(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }

    #[test]
    fn values_convert_to_json() {
        assert_eq!(value_to_json(libsql::Value::Integer(3)), serde_json::json!(3));
        assert_eq!(
            value_to_json(libsql::Value::Text("5A".into())),
            serde_json::json!("5A")
        );
        assert!(value_to_json(libsql::Value::Null).is_null());
    }
}

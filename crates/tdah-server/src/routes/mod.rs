pub mod account;
pub mod assistant;
pub mod health;
pub mod links;
pub mod students;
pub mod teachers;

use serde_json::Value;
use tdah_core::errors::parse_id;

use crate::error::ApiError;

/// Read an id from a JSON body field that may hold a number or a numeric string.
pub(crate) fn id_from_json(value: Option<&Value>, what: &str) -> Result<i64, ApiError> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ApiError::validation(format!("Invalid {what} ID"))),
        Some(Value::String(s)) => Ok(parse_id(s, what)?),
        _ => Err(ApiError::validation(format!("Invalid {what} ID"))),
    }
}

/// Read a required, non-blank string field from a JSON body.
pub(crate) fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Read a required password field. Only the empty string is rejected; the
/// value is returned exactly as sent.
pub(crate) fn required_secret<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

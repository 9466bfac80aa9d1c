use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tdah_core::entities::Principal;
use tdah_core::enums::Role;

use crate::error::AuthError;

/// Keys under which historical tokens carried the principal id, in lookup order.
pub const ID_CLAIM_ALIASES: [&str; 5] = ["userId", "id", "id_profesor", "id_admin", "sub"];

/// Keys under which historical tokens carried the role, in lookup order.
pub const ROLE_CLAIM_ALIASES: [&str; 2] = ["rol", "role"];

/// Claims written into every token this service issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssuedClaims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub rol: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Reduce a verified claim set to the canonical [`Principal`].
///
/// The first alias holding a resolvable value wins. Ids may be JSON integers
/// or numeric strings.
///
/// # Errors
///
/// Returns `AuthError::IncompleteClaims` if no id or no known role is found.
pub fn normalize(claims: &Map<String, Value>) -> Result<Principal, AuthError> {
    let id = ID_CLAIM_ALIASES
        .iter()
        .find_map(|key| claims.get(*key).and_then(id_value))
        .ok_or(AuthError::IncompleteClaims)?;

    let role = ROLE_CLAIM_ALIASES
        .iter()
        .find_map(|key| {
            claims
                .get(*key)
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Role>().ok())
        })
        .ok_or(AuthError::IncompleteClaims)?;

    Ok(Principal { id, role })
}

fn id_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

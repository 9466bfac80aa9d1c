use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Canonical identity of an authenticated caller.
///
/// Produced by the token resolver in `tdah-auth`; never built from raw
/// claims anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

/// A stored principal including its credential, as needed by login and
/// password changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalAccount {
    pub id: i64,
    pub role: Role,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub can_manage_students: bool,
}

impl PrincipalAccount {
    #[must_use]
    pub const fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            role: self.role,
        }
    }
}

/// Fields for creating a principal. `password_hash` is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrincipal {
    pub role: Role,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
}

/// Body of `GET /profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos")]
    pub surname: String,
    pub email: String,
}

/// A teacher as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeacherSummary {
    #[serde(rename = "id_profesor")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos")]
    pub surname: String,
    pub email: String,
    #[serde(rename = "puede_gestionar_alumnos")]
    pub can_manage_students: bool,
}

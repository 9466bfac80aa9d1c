//! Roles and directory filter fields.
//!
//! Both enums carry two representations: the wire name the frontend sends and
//! receives, and the value stored in (or interpolated into) SQL. Only the
//! `&'static str` returned by these methods ever reaches a query string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "profesor", alias = "teacher")]
    Teacher,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Wire name, also used in issued tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "profesor",
            Self::Admin => "admin",
        }
    }

    /// Value stored in the `principals.role` column.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Accepts the wire name, the SQL name, and the English alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profesor" | "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            other => Err(CoreError::validation(format!("Unknown role '{other}'"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FilterField
// ---------------------------------------------------------------------------

/// Student column a directory listing may be filtered on.
///
/// This whitelist is the only path from caller input to a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterField {
    #[serde(rename = "nombre")]
    Name,
    #[serde(rename = "apellidos")]
    Surname,
    #[serde(rename = "curso")]
    Course,
}

impl FilterField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Surname, Self::Course];

    /// Wire name used by the `filter_by` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "nombre",
            Self::Surname => "apellidos",
            Self::Course => "curso",
        }
    }

    /// Case-folded column in the `students` table that filters match against.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Name => "name_folded",
            Self::Surname => "surname_folded",
            Self::Course => "course_folded",
        }
    }
}

impl FromStr for FilterField {
    type Err = CoreError;

    /// Exact match against the wire names. No trimming or case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::validation("Invalid filter field"))
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("profesor", Role::Teacher)]
    #[case("teacher", Role::Teacher)]
    #[case("Admin", Role::Admin)]
    fn role_from_str_accepts_aliases(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn role_rejects_unknown() {
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"profesor\"");
        let parsed: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(parsed, Role::Teacher);
    }

    #[rstest]
    #[case("nombre", FilterField::Name, "name_folded")]
    #[case("apellidos", FilterField::Surname, "surname_folded")]
    #[case("curso", FilterField::Course, "course_folded")]
    fn filter_field_maps_to_fixed_column(
        #[case] raw: &str,
        #[case] field: FilterField,
        #[case] column: &str,
    ) {
        let parsed: FilterField = raw.parse().unwrap();
        assert_eq!(parsed, field);
        assert_eq!(parsed.column(), column);
    }

    #[rstest]
    #[case("email")]
    #[case("NOMBRE")]
    #[case("nombre; DROP TABLE students; --")]
    #[case("curso) OR 1=1 --")]
    #[case("")]
    fn filter_field_rejects_everything_else(#[case] raw: &str) {
        let err = raw.parse::<FilterField>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

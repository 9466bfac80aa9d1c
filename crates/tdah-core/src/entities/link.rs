use serde::{Deserialize, Serialize};

/// Authorizes a teacher to see a student. `(teacher_id, student_id)` is unique.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OwnershipLink {
    #[serde(rename = "id_profesor")]
    pub teacher_id: i64,
    #[serde(rename = "id_alumno")]
    pub student_id: i64,
}

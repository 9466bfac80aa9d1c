use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A student as listed by the directory and the global search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "id_alumno")]
    pub id: i64,
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos")]
    pub surname: String,
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "curso")]
    pub course: Option<String>,
}

/// Fields for inserting a student. Students are managed outside the
/// directory; this is used by seeding and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStudent {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub gender: Option<String>,
    pub course: Option<String>,
}

/// One row of `student LEFT JOIN exercises`.
///
/// A student without exercises yields a single row whose exercise fields are
/// all `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentStatsRow {
    #[serde(flatten)]
    pub student: Student,
    #[serde(rename = "id_ejercicio")]
    pub exercise_id: Option<i64>,
    #[serde(rename = "aciertos")]
    pub correct_count: Option<i64>,
    #[serde(rename = "fallos")]
    pub error_count: Option<i64>,
    #[serde(rename = "letras_correctas")]
    pub correct_letters: Option<i64>,
    #[serde(rename = "date_inicio")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(rename = "date_fin")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(rename = "dificultad")]
    pub difficulty: Option<String>,
    #[serde(rename = "tipo_ejercicio")]
    pub exercise_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn student_serializes_with_wire_names() {
        let s = Student {
            id: 1,
            email: "ana@school.test".into(),
            name: "Ana".into(),
            surname: "Ruiz".into(),
            gender: None,
            course: Some("5A".into()),
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id_alumno": 1,
                "email": "ana@school.test",
                "nombre": "Ana",
                "apellidos": "Ruiz",
                "genero": null,
                "curso": "5A"
            })
        );
    }

    #[test]
    fn stats_row_flattens_student() {
        let row = StudentStatsRow {
            student: Student {
                id: 2,
                email: "b@school.test".into(),
                name: "Bea".into(),
                surname: "Gil".into(),
                gender: Some("F".into()),
                course: Some("5B".into()),
            },
            exercise_id: None,
            correct_count: None,
            error_count: None,
            correct_letters: None,
            start_time: None,
            end_time: None,
            difficulty: None,
            exercise_type: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id_alumno"], 2);
        assert_eq!(json["curso"], "5B");
        assert!(json["aciertos"].is_null());
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single exercise attempt. Append-only; read through the student id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseRecord {
    #[serde(rename = "id_ejercicio")]
    pub id: i64,
    #[serde(rename = "id_alumno")]
    pub student_id: i64,
    #[serde(rename = "aciertos")]
    pub correct_count: i64,
    #[serde(rename = "fallos")]
    pub error_count: i64,
    #[serde(rename = "letras_correctas")]
    pub correct_letters: i64,
    #[serde(rename = "date_inicio")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "date_fin")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "dificultad")]
    pub difficulty: String,
    #[serde(rename = "tipo_ejercicio")]
    pub exercise_type: String,
}

/// Fields for appending an exercise attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewExercise {
    #[serde(rename = "id_alumno")]
    pub student_id: i64,
    #[serde(rename = "aciertos")]
    pub correct_count: i64,
    #[serde(rename = "fallos")]
    pub error_count: i64,
    #[serde(rename = "letras_correctas")]
    pub correct_letters: i64,
    #[serde(rename = "date_inicio")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "date_fin")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "dificultad")]
    pub difficulty: String,
    #[serde(rename = "tipo_ejercicio")]
    pub exercise_type: String,
}

//! Exercise repository. Records are append-only.

use tdah_core::entities::{ExerciseRecord, NewExercise};

use crate::TdahConn;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime};

fn row_to_exercise(row: &libsql::Row) -> Result<ExerciseRecord, DatabaseError> {
    Ok(ExerciseRecord {
        id: row.get::<i64>(0)?,
        student_id: row.get::<i64>(1)?,
        correct_count: row.get::<i64>(2)?,
        error_count: row.get::<i64>(3)?,
        correct_letters: row.get::<i64>(4)?,
        start_time: parse_datetime(&row.get::<String>(5)?)?,
        end_time: parse_datetime(&row.get::<String>(6)?)?,
        difficulty: row.get::<String>(7)?,
        exercise_type: row.get::<String>(8)?,
    })
}

impl TdahConn {
    /// Append an exercise attempt and return its id.
    ///
    /// # Errors
    ///
    /// `NotFound` if the student does not exist.
    pub async fn insert_exercise(&self, exercise: &NewExercise) -> Result<i64, DatabaseError> {
        if !self.student_exists(exercise.student_id).await? {
            return Err(DatabaseError::not_found("student", exercise.student_id));
        }

        self.conn()
            .execute(
                "INSERT INTO exercises (student_id, correct_count, error_count, correct_letters,
                                        start_time, end_time, difficulty, exercise_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    exercise.student_id,
                    exercise.correct_count,
                    exercise.error_count,
                    exercise.correct_letters,
                    format_datetime(&exercise.start_time),
                    format_datetime(&exercise.end_time),
                    exercise.difficulty.as_str(),
                    exercise.exercise_type.as_str()
                ],
            )
            .await?;
        Ok(self.conn().last_insert_rowid())
    }

    /// All exercise records of one student, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn exercises_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<ExerciseRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, student_id, correct_count, error_count, correct_letters,
                        start_time, end_time, difficulty, exercise_type
                 FROM exercises WHERE student_id = ?1
                 ORDER BY start_time, id",
                [student_id],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_exercise(&row)?);
        }
        Ok(records)
    }
}

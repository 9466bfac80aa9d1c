//! Ownership link repository: which teacher may see which student.

use tdah_core::entities::OwnershipLink;

use crate::TdahConn;
use crate::error::DatabaseError;

impl TdahConn {
    /// Link `student_id` to `teacher_id`.
    ///
    /// The insert ignores duplicates and reports them through the changed-row
    /// count, so two concurrent links of the same pair yield one success and
    /// one `Conflict`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the student or the teacher does not exist (a teacher
    /// deleted while its token is still valid), `Conflict` if the link
    /// already exists.
    pub async fn link_student(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<OwnershipLink, DatabaseError> {
        if !self.student_exists(student_id).await? {
            return Err(DatabaseError::not_found("student", student_id));
        }

        let changed = match self
            .conn()
            .execute(
                "INSERT OR IGNORE INTO teacher_student (teacher_id, student_id) VALUES (?1, ?2)",
                [teacher_id, student_id],
            )
            .await
            .map_err(DatabaseError::from)
        {
            Ok(changed) => changed,
            Err(e) if e.is_foreign_key_violation() => {
                tracing::info!(teacher_id, student_id, "link for missing principal");
                return Err(DatabaseError::not_found("principal", teacher_id));
            }
            Err(e) => return Err(e),
        };

        if changed == 0 {
            return Err(DatabaseError::Conflict(
                "Student already linked to this teacher".to_string(),
            ));
        }

        tracing::info!(teacher_id, student_id, "student linked");
        Ok(OwnershipLink {
            teacher_id,
            student_id,
        })
    }

    /// Remove the link between `teacher_id` and `student_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such link exists.
    pub async fn unlink_student(&self, teacher_id: i64, student_id: i64) -> Result<(), DatabaseError> {
        let removed = self
            .conn()
            .execute(
                "DELETE FROM teacher_student WHERE teacher_id = ?1 AND student_id = ?2",
                [teacher_id, student_id],
            )
            .await?;

        if removed == 0 {
            return Err(DatabaseError::not_found(
                "link",
                format!("{teacher_id}/{student_id}"),
            ));
        }

        tracing::info!(teacher_id, student_id, "student unlinked");
        Ok(())
    }

    /// Every link held by `teacher_id`, ordered by student id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn links_for_teacher(&self, teacher_id: i64) -> Result<Vec<OwnershipLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT teacher_id, student_id FROM teacher_student
                 WHERE teacher_id = ?1 ORDER BY student_id",
                [teacher_id],
            )
            .await?;

        let mut links = Vec::new();
        while let Some(row) = rows.next().await? {
            links.push(OwnershipLink {
                teacher_id: row.get::<i64>(0)?,
                student_id: row.get::<i64>(1)?,
            });
        }
        Ok(links)
    }
}

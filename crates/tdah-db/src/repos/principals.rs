//! Principal repository: teachers and admins, accounts, and the admin cascade.

use tdah_core::entities::{NewPrincipal, PrincipalAccount, Profile, TeacherSummary};
use tdah_core::enums::Role;

use crate::TdahConn;
use crate::error::DatabaseError;

const ACCOUNT_COLUMNS: &str =
    "id, role, email, password_hash, name, surname, can_manage_students";

fn row_to_account(row: &libsql::Row) -> Result<PrincipalAccount, DatabaseError> {
    let role = row
        .get::<String>(1)?
        .parse::<Role>()
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
    Ok(PrincipalAccount {
        id: row.get::<i64>(0)?,
        role,
        email: row.get::<String>(2)?,
        password_hash: row.get::<String>(3)?,
        name: row.get::<String>(4)?,
        surname: row.get::<String>(5)?,
        can_manage_students: row.get::<i64>(6)? != 0,
    })
}

fn row_to_teacher(row: &libsql::Row) -> Result<TeacherSummary, DatabaseError> {
    Ok(TeacherSummary {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        surname: row.get::<String>(2)?,
        email: row.get::<String>(3)?,
        can_manage_students: row.get::<i64>(4)? != 0,
    })
}

impl TdahConn {
    /// Insert a principal and return its id.
    ///
    /// # Errors
    ///
    /// `Conflict` if the email is already registered.
    pub async fn create_principal(&self, principal: &NewPrincipal) -> Result<i64, DatabaseError> {
        let result = self
            .conn()
            .execute(
                "INSERT INTO principals (role, email, password_hash, name, surname)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    principal.role.as_sql(),
                    principal.email.as_str(),
                    principal.password_hash.as_str(),
                    principal.name.as_str(),
                    principal.surname.as_str()
                ],
            )
            .await
            .map_err(DatabaseError::from);

        match result {
            Ok(_) => {
                let id = self.conn().last_insert_rowid();
                tracing::info!(principal_id = id, role = %principal.role, "principal created");
                Ok(id)
            }
            Err(e) if e.is_unique_violation() => {
                Err(DatabaseError::Conflict("Email already exists".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Look up an account by exact email.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalAccount>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM principals WHERE email = ?1"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up an account by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_account_by_id(
        &self,
        principal_id: i64,
    ) -> Result<Option<PrincipalAccount>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM principals WHERE id = ?1"),
                [principal_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Public profile of a principal.
    ///
    /// # Errors
    ///
    /// `NotFound` if the principal does not exist.
    pub async fn profile(&self, principal_id: i64) -> Result<Profile, DatabaseError> {
        let account = self
            .find_account_by_id(principal_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", principal_id))?;
        Ok(Profile {
            name: account.name,
            surname: account.surname,
            email: account.email,
        })
    }

    /// Replace the stored password hash.
    ///
    /// # Errors
    ///
    /// `NotFound` if the principal does not exist.
    pub async fn update_password(
        &self,
        principal_id: i64,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE principals SET password_hash = ?1 WHERE id = ?2",
                libsql::params![password_hash, principal_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("user", principal_id));
        }
        tracing::info!(principal_id, "password changed");
        Ok(())
    }

    /// Every teacher, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_teachers(&self) -> Result<Vec<TeacherSummary>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, surname, email, can_manage_students
                 FROM principals WHERE role = ?1 ORDER BY id",
                [Role::Teacher.as_sql()],
            )
            .await?;

        let mut teachers = Vec::new();
        while let Some(row) = rows.next().await? {
            teachers.push(row_to_teacher(&row)?);
        }
        Ok(teachers)
    }

    /// Set whether a teacher may manage students, returning the updated row.
    ///
    /// # Errors
    ///
    /// `NotFound` if no teacher has this id.
    pub async fn set_can_manage_students(
        &self,
        teacher_id: i64,
        allowed: bool,
    ) -> Result<TeacherSummary, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "UPDATE principals SET can_manage_students = ?1
                 WHERE id = ?2 AND role = ?3
                 RETURNING id, name, surname, email, can_manage_students",
                libsql::params![i64::from(allowed), teacher_id, Role::Teacher.as_sql()],
            )
            .await?;

        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("teacher", teacher_id))?;
        let teacher = row_to_teacher(&row)?;
        tracing::info!(teacher_id, allowed, "teacher permission updated");
        Ok(teacher)
    }

    /// Delete a teacher together with all of its ownership links.
    ///
    /// Runs as one transaction: when the teacher does not exist nothing is
    /// removed. Returns the number of links that were deleted.
    ///
    /// # Errors
    ///
    /// `NotFound` if no teacher has this id.
    pub async fn delete_teacher_cascade(&self, teacher_id: i64) -> Result<u64, DatabaseError> {
        let links_removed = self
            .with_transaction(|tx| async move {
                let links_removed = tx
                    .execute(
                        "DELETE FROM teacher_student WHERE teacher_id = ?1",
                        [teacher_id],
                    )
                    .await?;
                let deleted = tx
                    .execute(
                        "DELETE FROM principals WHERE id = ?1 AND role = ?2",
                        libsql::params![teacher_id, Role::Teacher.as_sql()],
                    )
                    .await?;
                if deleted == 0 {
                    return Err(DatabaseError::not_found("teacher", teacher_id));
                }
                Ok::<u64, DatabaseError>(links_removed)
            })
            .await?;

        tracing::info!(teacher_id, links_removed, "teacher deleted");
        Ok(links_removed)
    }
}

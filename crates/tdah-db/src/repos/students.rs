//! Student repository: scoped directory, global search, stats.

use libsql::Value;
use tdah_core::entities::{NewStudent, Student, StudentStatsRow};
use tdah_core::paging::{DirectoryQuery, fold_case, total_pages};
use tdah_core::responses::StudentPage;

use crate::TdahConn;
use crate::error::DatabaseError;
use crate::helpers::{contains_pattern, get_opt_string, parse_optional_datetime};

const STUDENT_COLUMNS: &str = "s.id, s.email, s.name, s.surname, s.gender, s.course";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get::<i64>(0)?,
        email: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        surname: row.get::<String>(3)?,
        gender: get_opt_string(row, 4)?,
        course: get_opt_string(row, 5)?,
    })
}

fn row_to_stats(row: &libsql::Row) -> Result<StudentStatsRow, DatabaseError> {
    Ok(StudentStatsRow {
        student: row_to_student(row)?,
        exercise_id: row.get::<Option<i64>>(6)?,
        correct_count: row.get::<Option<i64>>(7)?,
        error_count: row.get::<Option<i64>>(8)?,
        correct_letters: row.get::<Option<i64>>(9)?,
        start_time: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        end_time: parse_optional_datetime(get_opt_string(row, 11)?.as_deref())?,
        difficulty: get_opt_string(row, 12)?,
        exercise_type: get_opt_string(row, 13)?,
    })
}

impl TdahConn {
    /// Insert a student and return its id.
    ///
    /// # Errors
    ///
    /// `Conflict` if the email is taken, `DatabaseError` otherwise.
    pub async fn insert_student(&self, student: &NewStudent) -> Result<i64, DatabaseError> {
        let result = self
            .conn()
            .execute(
                "INSERT INTO students
                     (email, name, surname, gender, course,
                      email_folded, name_folded, surname_folded, course_folded)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    student.email.as_str(),
                    student.name.as_str(),
                    student.surname.as_str(),
                    student.gender.as_deref(),
                    student.course.as_deref(),
                    fold_case(&student.email),
                    fold_case(&student.name),
                    fold_case(&student.surname),
                    student.course.as_deref().map(fold_case)
                ],
            )
            .await
            .map_err(DatabaseError::from);

        match result {
            Ok(_) => Ok(self.conn().last_insert_rowid()),
            Err(e) if e.is_unique_violation() => Err(DatabaseError::Conflict(format!(
                "Student email already exists: {}",
                student.email
            ))),
            Err(e) => Err(e),
        }
    }

    /// Whether a student with `student_id` exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn student_exists(&self, student_id: i64) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT 1 FROM students WHERE id = ?1", [student_id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// One page of the students linked to `teacher_id`, optionally filtered.
    ///
    /// The filter column comes from the `FilterField` whitelist and is one
    /// of the `*_folded` columns; the needle is always bound as a parameter.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn list_scoped_students(
        &self,
        teacher_id: i64,
        query: &DirectoryQuery,
    ) -> Result<StudentPage, DatabaseError> {
        let mut params: Vec<Value> = vec![Value::Integer(teacher_id)];
        let where_clause = match &query.filter {
            Some(filter) => {
                params.push(Value::Text(contains_pattern(&filter.needle)));
                format!(
                    "ts.teacher_id = ?1 AND s.{} LIKE ?2 ESCAPE '\\'",
                    filter.field.column()
                )
            }
            None => String::from("ts.teacher_id = ?1"),
        };

        let count_sql = format!(
            "SELECT COUNT(*) FROM students s
             JOIN teacher_student ts ON ts.student_id = s.id
             WHERE {where_clause}"
        );
        let mut rows = self
            .conn()
            .query(&count_sql, libsql::params_from_iter(params.clone()))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = u64::try_from(row.get::<i64>(0)?).unwrap_or(0);

        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(Value::Integer(i64::from(query.page_size)));
        params.push(Value::Integer(
            i64::try_from(query.offset()).unwrap_or(i64::MAX),
        ));

        let page_sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students s
             JOIN teacher_student ts ON ts.student_id = s.id
             WHERE {where_clause}
             ORDER BY s.id
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
        );
        let mut rows = self
            .conn()
            .query(&page_sql, libsql::params_from_iter(params))
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }

        tracing::debug!(
            teacher_id,
            count,
            returned = students.len(),
            "scoped student listing"
        );

        Ok(StudentPage {
            alumnos: students,
            total_pages: total_pages(count, query.page_size),
        })
    }

    /// Students whose email contains `needle`, case-insensitively, ordered
    /// by email. Not scoped to any teacher.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_students_by_email(
        &self,
        needle: &str,
        limit: u32,
    ) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLUMNS} FROM students s
                     WHERE s.email_folded LIKE ?1 ESCAPE '\\'
                     ORDER BY s.email
                     LIMIT ?2"
                ),
                libsql::params![contains_pattern(&fold_case(needle)), i64::from(limit)],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// The student joined with each of its exercise records, oldest first.
    ///
    /// A student without exercises yields one row with empty exercise fields.
    ///
    /// # Errors
    ///
    /// `NotFound` if the student does not exist.
    pub async fn student_stats(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentStatsRow>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLUMNS},
                            e.id, e.correct_count, e.error_count, e.correct_letters,
                            e.start_time, e.end_time, e.difficulty, e.exercise_type
                     FROM students s
                     LEFT JOIN exercises e ON e.student_id = s.id
                     WHERE s.id = ?1
                     ORDER BY e.start_time, e.id"
                ),
                [student_id],
            )
            .await?;

        let mut stats = Vec::new();
        while let Some(row) = rows.next().await? {
            stats.push(row_to_stats(&row)?);
        }

        if stats.is_empty() {
            return Err(DatabaseError::not_found("student", student_id));
        }
        Ok(stats)
    }
}

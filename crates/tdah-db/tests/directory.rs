//! Scoped directory, global search, and stats against a real database file.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use chrono::NaiveDate;
use tdah_core::entities::{NewExercise, NewPrincipal, NewStudent};
use tdah_core::enums::Role;
use tdah_core::paging::{DirectoryQuery, PagingLimits};
use tdah_db::TdahDb;
use tdah_db::error::DatabaseError;

async fn test_db() -> (TempDir, TdahDb) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directory.db");
    let db = TdahDb::open_local(path.to_str().unwrap()).await.unwrap();
    (dir, db)
}

fn teacher(email: &str) -> NewPrincipal {
    NewPrincipal {
        role: Role::Teacher,
        email: email.to_string(),
        password_hash: "x".to_string(),
        name: "T".to_string(),
        surname: "Teacher".to_string(),
    }
}

fn student(email: &str, name: &str, course: &str) -> NewStudent {
    NewStudent {
        email: email.to_string(),
        name: name.to_string(),
        surname: "Surname".to_string(),
        gender: None,
        course: Some(course.to_string()),
    }
}

fn query(page: &str, size: &str, filter_by: Option<&str>, q: Option<&str>) -> DirectoryQuery {
    DirectoryQuery::parse(Some(page), Some(size), filter_by, q, PagingLimits::default()).unwrap()
}

#[tokio::test]
async fn course_filter_matches_case_insensitively() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let t1 = conn.create_principal(&teacher("t1@school.test")).await.unwrap();
    let s1 = conn.insert_student(&student("s1@school.test", "Ana", "5A")).await.unwrap();
    let s2 = conn.insert_student(&student("s2@school.test", "Bea", "5B")).await.unwrap();
    conn.link_student(t1, s1).await.unwrap();
    conn.link_student(t1, s2).await.unwrap();

    let page = conn
        .list_scoped_students(t1, &query("1", "16", Some("curso"), Some("5a")))
        .await
        .unwrap();
    assert_eq!(page.alumnos.len(), 1);
    assert_eq!(page.alumnos[0].id, s1);
    assert_eq!(page.total_pages, 1);
}

#[rstest]
#[case("nombre", "Ángel")]
#[case("nombre", "ángel")]
#[case("nombre", "ÁNGEL")]
#[case("apellidos", "núñez")]
#[case("apellidos", "NÚÑEZ")]
#[case("curso", "1º eso")]
#[tokio::test]
async fn accented_names_match_in_any_case(#[case] filter_by: &str, #[case] needle: &str) {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let t = conn.create_principal(&teacher("t@school.test")).await.unwrap();
    let angel = conn
        .insert_student(&NewStudent {
            email: "angel@school.test".to_string(),
            name: "Ángel".to_string(),
            surname: "Núñez".to_string(),
            gender: None,
            course: Some("1º ESO".to_string()),
        })
        .await
        .unwrap();
    let other = conn.insert_student(&student("o@school.test", "Otro", "2B")).await.unwrap();
    conn.link_student(t, angel).await.unwrap();
    conn.link_student(t, other).await.unwrap();

    let page = conn
        .list_scoped_students(t, &query("1", "16", Some(filter_by), Some(needle)))
        .await
        .unwrap();
    assert_eq!(page.alumnos.len(), 1);
    assert_eq!(page.alumnos[0].name, "Ángel");
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn email_search_folds_non_ascii_capitals() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    conn.insert_student(&student("ÉLODIE@school.test", "Élodie", "5A")).await.unwrap();

    let found = conn.search_students_by_email("élodie", 10).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn teachers_only_see_their_own_students() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let a = conn.create_principal(&teacher("a@school.test")).await.unwrap();
    let b = conn.create_principal(&teacher("b@school.test")).await.unwrap();
    let shared = conn.insert_student(&student("x@school.test", "X", "5A")).await.unwrap();
    let only_b = conn.insert_student(&student("y@school.test", "Y", "5A")).await.unwrap();
    conn.link_student(a, shared).await.unwrap();
    conn.link_student(b, shared).await.unwrap();
    conn.link_student(b, only_b).await.unwrap();

    let seen_by_a = conn
        .list_scoped_students(a, &query("1", "16", None, None))
        .await
        .unwrap();
    let ids: Vec<i64> = seen_by_a.alumnos.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![shared]);

    let seen_by_b = conn
        .list_scoped_students(b, &query("1", "16", None, None))
        .await
        .unwrap();
    assert_eq!(seen_by_b.alumnos.len(), 2);
}

#[rstest]
#[case("1", "3", 3, 3)]
#[case("3", "3", 1, 3)]
#[case("4", "3", 0, 3)]
#[case("1", "7", 7, 1)]
#[case("2", "4", 3, 2)]
#[tokio::test]
async fn pages_never_exceed_page_size(
    #[case] page: &str,
    #[case] size: &str,
    #[case] expected_len: usize,
    #[case] expected_pages: u64,
) {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let t = conn.create_principal(&teacher("p@school.test")).await.unwrap();
    for i in 0..7 {
        let id = conn
            .insert_student(&student(&format!("s{i}@school.test"), "N", "5A"))
            .await
            .unwrap();
        conn.link_student(t, id).await.unwrap();
    }

    let page = conn
        .list_scoped_students(t, &query(page, size, None, None))
        .await
        .unwrap();
    assert_eq!(page.alumnos.len(), expected_len);
    assert_eq!(page.total_pages, expected_pages);
}

#[tokio::test]
async fn listing_is_ordered_by_student_id() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let t = conn.create_principal(&teacher("o@school.test")).await.unwrap();
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(
            conn.insert_student(&student(&format!("o{i}@school.test"), "N", "5A"))
                .await
                .unwrap(),
        );
    }
    for id in ids.iter().rev() {
        conn.link_student(t, *id).await.unwrap();
    }

    let page = conn
        .list_scoped_students(t, &query("1", "16", None, None))
        .await
        .unwrap();
    let listed: Vec<i64> = page.alumnos.iter().map(|s| s.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn like_metacharacters_in_query_match_literally() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    let t = conn.create_principal(&teacher("m@school.test")).await.unwrap();
    let pct = conn.insert_student(&student("a@school.test", "100%", "5A")).await.unwrap();
    let plain = conn.insert_student(&student("b@school.test", "1000", "5A")).await.unwrap();
    conn.link_student(t, pct).await.unwrap();
    conn.link_student(t, plain).await.unwrap();

    let page = conn
        .list_scoped_students(t, &query("1", "16", Some("nombre"), Some("0%")))
        .await
        .unwrap();
    let ids: Vec<i64> = page.alumnos.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![pct]);
}

#[tokio::test]
async fn empty_scope_has_zero_pages() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    let t = conn.create_principal(&teacher("e@school.test")).await.unwrap();

    let page = conn
        .list_scoped_students(t, &query("1", "16", None, None))
        .await
        .unwrap();
    assert!(page.alumnos.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn global_search_is_unscoped_and_ordered_by_email() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();

    conn.insert_student(&student("zoe@school.test", "Zoe", "5A")).await.unwrap();
    conn.insert_student(&student("ALBA@school.test", "Alba", "5B")).await.unwrap();
    conn.insert_student(&student("other@elsewhere.test", "O", "5B")).await.unwrap();

    let found = conn.search_students_by_email("SCHOOL", 50).await.unwrap();
    let emails: Vec<&str> = found.iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, vec!["ALBA@school.test", "zoe@school.test"]);

    let limited = conn.search_students_by_email("school", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn stats_without_exercises_is_one_row() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    let id = conn.insert_student(&student("n@school.test", "N", "5A")).await.unwrap();

    let rows = conn.student_stats(id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student.id, id);
    assert!(rows[0].exercise_id.is_none());
}

#[tokio::test]
async fn stats_has_one_row_per_exercise() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    let id = conn.insert_student(&student("r@school.test", "R", "5A")).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    for (hour, correct) in [(10, 8), (9, 5)] {
        conn.insert_exercise(&NewExercise {
            student_id: id,
            correct_count: correct,
            error_count: 1,
            correct_letters: 20,
            start_time: day.and_hms_opt(hour, 0, 0).unwrap(),
            end_time: day.and_hms_opt(hour, 5, 0).unwrap(),
            difficulty: "facil".to_string(),
            exercise_type: "letras".to_string(),
        })
        .await
        .unwrap();
    }

    let rows = conn.student_stats(id).await.unwrap();
    let correct: Vec<Option<i64>> = rows.iter().map(|r| r.correct_count).collect();
    assert_eq!(correct, vec![Some(5), Some(8)]);
    assert_eq!(
        rows[0].start_time,
        Some(day.and_hms_opt(9, 0, 0).unwrap())
    );

    let records = conn.exercises_for_student(id).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn stats_for_missing_student_is_not_found() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    assert!(matches!(
        conn.student_stats(404).await,
        Err(DatabaseError::NotFound { .. })
    ));
}

#[tokio::test]
async fn read_only_rows_come_back_as_json_objects() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    conn.insert_student(&student("j@school.test", "Jon", "5A")).await.unwrap();

    let rows = conn
        .query_json_rows("SELECT name AS nombre, course FROM students")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["nombre"], "Jon");
    assert_eq!(rows[0]["course"], "5A");
}

#[tokio::test]
async fn json_rows_refuse_writes() {
    let (_dir, db) = test_db().await;
    let conn = db.acquire().await.unwrap();
    conn.insert_student(&student("w@school.test", "W", "5A")).await.unwrap();

    assert!(conn.query_json_rows("DELETE FROM students").await.is_err());
    assert_eq!(conn.search_students_by_email("w@", 10).await.unwrap().len(), 1);

    // The connection is writable again once the ad hoc query is done.
    conn.insert_student(&student("x@school.test", "X", "5A")).await.unwrap();
}

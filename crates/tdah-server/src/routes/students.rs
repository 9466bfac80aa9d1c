//! Scoped directory, global email search, and per-student stats.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tdah_core::entities::StudentStatsRow;
use tdah_core::errors::parse_id;
use tdah_core::paging::DirectoryQuery;
use tdah_core::responses::{StudentPage, StudentSearchResponse};

use crate::error::ApiError;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

/// Raw query string of `GET /alumnos/`. Everything stays a string until
/// `DirectoryQuery::parse` has checked it.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryParams {
    page: Option<String>,
    page_size: Option<String>,
    filter_by: Option<String>,
    query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    email: Option<String>,
}

pub async fn list_students(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    params: Result<Query<DirectoryParams>, QueryRejection>,
) -> Result<Json<StudentPage>, ApiError> {
    let Query(params) = params?;
    let query = DirectoryQuery::parse(
        params.page.as_deref(),
        params.page_size.as_deref(),
        params.filter_by.as_deref(),
        params.query.as_deref(),
        state.directory.paging_limits(),
    )?;

    let conn = state.db.acquire().await?;
    let page = conn.list_scoped_students(principal.id, &query).await?;
    Ok(Json(page))
}

pub async fn student_stats(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<StudentStatsRow>>, ApiError> {
    let student_id = parse_id(&raw_id, "student")?;
    let conn = state.db.acquire().await?;
    let rows = conn.student_stats(student_id).await?;
    tracing::debug!(principal_id = principal.id, student_id, rows = rows.len(), "student stats");
    Ok(Json(rows))
}

pub async fn search_students(
    AuthPrincipal(_principal): AuthPrincipal,
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<StudentSearchResponse>, ApiError> {
    let Query(params) = params?;
    let needle = params.email.as_deref().map(str::trim).unwrap_or_default();
    if needle.is_empty() {
        return Ok(Json(StudentSearchResponse { alumnos: Vec::new() }));
    }

    let conn = state.db.acquire().await?;
    let alumnos = conn
        .search_students_by_email(needle, state.directory.search_limit)
        .await?;
    Ok(Json(StudentSearchResponse { alumnos }))
}

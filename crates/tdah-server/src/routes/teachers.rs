//! Admin-only teacher management.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::Value;
use tdah_core::entities::TeacherSummary;
use tdah_core::errors::parse_id;
use tdah_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::extract::AdminPrincipal;
use crate::state::AppState;

pub async fn list_teachers(
    AdminPrincipal(_admin): AdminPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherSummary>>, ApiError> {
    let conn = state.db.acquire().await?;
    Ok(Json(conn.list_teachers().await?))
}

pub async fn set_permission(
    AdminPrincipal(admin): AdminPrincipal,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TeacherSummary>, ApiError> {
    let teacher_id = parse_id(&raw_id, "teacher")?;
    let Json(body) = body?;
    let allowed = body
        .get("puede_gestionar_alumnos")
        .and_then(Value::as_bool)
        .ok_or_else(|| ApiError::validation("puede_gestionar_alumnos must be a boolean"))?;

    let conn = state.db.acquire().await?;
    let teacher = conn.set_can_manage_students(teacher_id, allowed).await?;
    tracing::info!(admin_id = admin.id, teacher_id, allowed, "permission changed");
    Ok(Json(teacher))
}

pub async fn delete_teacher(
    AdminPrincipal(admin): AdminPrincipal,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let teacher_id = parse_id(&raw_id, "teacher")?;

    let conn = state.db.acquire().await?;
    let links_removed = conn.delete_teacher_cascade(teacher_id).await?;
    tracing::info!(admin_id = admin.id, teacher_id, links_removed, "teacher removed");
    Ok(Json(MessageResponse::new(
        "Teacher and associated links deleted",
    )))
}

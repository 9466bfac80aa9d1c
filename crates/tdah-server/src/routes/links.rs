//! `POST`/`DELETE /profesor-alumno`: the caller links or unlinks a student.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::Value;
use tdah_core::responses::MessageResponse;

use super::id_from_json;
use crate::error::ApiError;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

pub async fn link_student(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(body) = body?;
    let student_id = id_from_json(body.get("id_alumno"), "student")?;

    let conn = state.db.acquire().await?;
    conn.link_student(principal.id, student_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Student linked to teacher")),
    ))
}

pub async fn unlink_student(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body?;
    let student_id = id_from_json(body.get("id_alumno"), "student")?;

    let conn = state.db.acquire().await?;
    conn.unlink_student(principal.id, student_id).await?;
    Ok(Json(MessageResponse::new("Student unlinked from teacher")))
}

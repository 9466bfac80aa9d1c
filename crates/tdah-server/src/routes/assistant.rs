//! `POST /api/gemini/ask`: answer a question, optionally grounded in a
//! read-only query the model proposes.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tdah_core::responses::AskResponse;

use super::id_from_json;
use crate::assistant::{
    AssistantError, NO_DATA_MARKER, answer_prompt, is_read_only_query, is_valid_model_name,
    sql_prompt, strip_code_fences,
};
use crate::error::ApiError;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

pub async fn ask(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(body) = body?;
    let question = body
        .get("question")
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::validation("question is required"))?;

    let student_id = match body.get("studentId") {
        None | Some(Value::Null) => None,
        some => Some(id_from_json(some, "student")?),
    };

    let model = match body.get("IaModel").and_then(Value::as_str) {
        Some(m) if !is_valid_model_name(m) => {
            return Err(ApiError::validation("Invalid model name"));
        }
        other => other,
    };

    if !state.assistant.is_configured() {
        return Err(AssistantError::NotConfigured.into());
    }

    let reply = state
        .assistant
        .generate(model, &sql_prompt(question, student_id))
        .await?;

    let rows = if reply.to_ascii_lowercase().contains(NO_DATA_MARKER) {
        None
    } else {
        let sql = strip_code_fences(&reply);
        if is_read_only_query(&sql) {
            let conn = state.db.acquire().await?;
            match conn.query_json_rows(&sql).await {
                Ok(rows) => Some(rows),
                Err(e) => {
                    tracing::warn!(principal_id = principal.id, error = %e, "assistant query failed");
                    None
                }
            }
        } else {
            tracing::warn!(principal_id = principal.id, "assistant proposed a non read-only statement");
            None
        }
    };

    let text = state
        .assistant
        .generate(model, &answer_prompt(question, rows.as_deref()))
        .await?;
    Ok(Json(AskResponse { text }))
}

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /test-db`: round-trip to the database.
pub async fn test_db(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let conn = state.db.acquire().await?;
    let now = conn.server_time().await?;
    Ok(Json(json!([{ "now": now }])))
}

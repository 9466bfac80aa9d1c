//! `ApiError`: where every crate's error type turns into an HTTP response.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tdah_auth::AuthError;
use tdah_core::errors::CoreError;
use tdah_core::responses::ErrorBody;
use tdah_db::error::DatabaseError;
use thiserror::Error;

use crate::assistant::AssistantError;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::validation(message))
    }

    /// Status, machine-readable code, and caller-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Auth(e) => match e {
                AuthError::Missing | AuthError::IncompleteClaims => {
                    (StatusCode::UNAUTHORIZED, "unauthorized", e.to_string())
                }
                AuthError::Invalid => (StatusCode::FORBIDDEN, "invalid_token", e.to_string()),
                AuthError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", e.to_string()),
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid_credentials", e.to_string())
                }
                AuthError::Signing(_) | AuthError::Hashing(_) => internal(),
            },
            Self::Core(e) => match e {
                CoreError::Validation(message) => {
                    (StatusCode::BAD_REQUEST, "validation", message.clone())
                }
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", e.to_string()),
                CoreError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message.clone()),
                CoreError::Other(_) => internal(),
            },
            Self::Database(e) => match e {
                DatabaseError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("{} not found", capitalize(entity)),
                ),
                DatabaseError::Conflict(message) => {
                    (StatusCode::CONFLICT, "conflict", message.clone())
                }
                _ => internal(),
            },
            Self::Assistant(e) => match e {
                AssistantError::NotConfigured => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "assistant_unavailable",
                    e.to_string(),
                ),
                AssistantError::Upstream(_) => (
                    StatusCode::BAD_GATEWAY,
                    "assistant_failed",
                    "The assistant could not answer".to_string(),
                ),
            },
        }
    }
}

const fn internal() -> (StatusCode, &'static str, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal", String::new())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, mut message) = self.parts();
        if status.is_server_error() {
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %self, "request failed");
                message = INTERNAL_MESSAGE.to_string();
            } else {
                tracing::warn!(error = %self, "upstream failure");
            }
        }
        let body = ErrorBody {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuthError::Missing.into(), StatusCode::UNAUTHORIZED)]
    #[case(AuthError::IncompleteClaims.into(), StatusCode::UNAUTHORIZED)]
    #[case(AuthError::Invalid.into(), StatusCode::FORBIDDEN)]
    #[case(AuthError::Forbidden.into(), StatusCode::FORBIDDEN)]
    #[case(AuthError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::validation("bad"), StatusCode::BAD_REQUEST)]
    #[case(DatabaseError::not_found("student", 1).into(), StatusCode::NOT_FOUND)]
    #[case(DatabaseError::Conflict("dup".into()).into(), StatusCode::CONFLICT)]
    #[case(DatabaseError::NoResult.into(), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AssistantError::NotConfigured.into(), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(AssistantError::Upstream("x".into()).into(), StatusCode::BAD_GATEWAY)]
    fn status_mapping(#[case] error: ApiError, #[case] status: StatusCode) {
        assert_eq!(error.into_response().status(), status);
    }

    #[test]
    fn internal_detail_is_hidden() {
        let (_, code, message) = ApiError::from(DatabaseError::Query("secret sql".into())).parts();
        assert_eq!(code, "internal");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn not_found_names_the_entity() {
        let (_, _, message) = ApiError::from(DatabaseError::not_found("student", 3)).parts();
        assert_eq!(message, "Student not found");
    }
}

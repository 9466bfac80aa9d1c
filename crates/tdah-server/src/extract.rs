//! Request extractors that resolve the caller before a handler runs.
//!
//! Both extractors only verify the token; neither touches the database, so
//! a rejected request never acquires a connection.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tdah_auth::{AuthError, require_admin};
use tdah_core::entities::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Any authenticated principal.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub Principal);

/// An authenticated admin.
#[derive(Debug, Clone, Copy)]
pub struct AdminPrincipal(pub Principal);

fn resolve(parts: &Parts, state: &AppState) -> Result<Principal, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::Invalid))
        .transpose()?;
    state.tokens.resolve(header)
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state).map(Self).map_err(|e| {
            tracing::debug!(error = %e, path = %parts.uri.path(), "authentication rejected");
            ApiError::from(e)
        })
    }
}

impl FromRequestParts<AppState> for AdminPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = resolve(parts, state)?;
        require_admin(principal).map(Self).map_err(|e| {
            tracing::info!(principal_id = principal.id, path = %parts.uri.path(), "admin route refused");
            ApiError::from(e)
        })
    }
}

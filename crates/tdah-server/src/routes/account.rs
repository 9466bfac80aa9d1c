//! Signup, login, profile, and password change.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::Value;
use tdah_auth::AuthError;
use tdah_auth::password::{hash_password_blocking, verify_password_blocking};
use tdah_core::entities::{NewPrincipal, Profile};
use tdah_core::enums::Role;
use tdah_core::responses::{LoginResponse, MessageResponse, SignupResponse};
use tdah_db::error::DatabaseError;

use super::{required_secret, required_str};
use crate::error::ApiError;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let Json(body) = body?;
    let (Some(email), Some(name), Some(surname), Some(password)) = (
        required_str(&body, "email"),
        required_str(&body, "nombre"),
        required_str(&body, "apellidos"),
        required_secret(&body, "password"),
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };

    let password_hash = hash_password_blocking(password.to_string()).await?;
    let conn = state.db.acquire().await?;
    let user_id = conn
        .create_principal(&NewPrincipal {
            role: Role::Teacher,
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
            surname: surname.to_string(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SignupResponse { user_id })))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body?;
    let (Some(email), Some(password)) = (
        required_str(&body, "email"),
        required_secret(&body, "password"),
    ) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let account = {
        let conn = state.db.acquire().await?;
        conn.find_account_by_email(email).await?
    };
    let Some(account) = account else {
        tracing::info!("login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verify_password_blocking(account.password_hash.clone(), password.to_string()).await {
        tracing::info!(principal_id = account.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&account.principal())?;
    tracing::info!(principal_id = account.id, role = %account.role, "login");
    Ok(Json(LoginResponse {
        token,
        rol: account.role,
        nombre: account.name,
        apellidos: account.surname,
        id: account.id,
    }))
}

pub async fn profile(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Profile>, ApiError> {
    let conn = state.db.acquire().await?;
    Ok(Json(conn.profile(principal.id).await?))
}

pub async fn change_password(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body?;
    let (Some(current), Some(new)) = (
        required_secret(&body, "currentPassword"),
        required_secret(&body, "newPassword"),
    ) else {
        return Err(ApiError::validation(
            "currentPassword and newPassword are required",
        ));
    };

    let conn = state.db.acquire().await?;
    let account = conn
        .find_account_by_id(principal.id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("user", principal.id))?;

    if !verify_password_blocking(account.password_hash, current.to_string()).await {
        tracing::info!(principal_id = principal.id, "password change with wrong current password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let new_hash = hash_password_blocking(new.to_string()).await?;
    conn.update_password(principal.id, &new_hash).await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

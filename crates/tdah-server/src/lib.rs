//! # tdah-server
//!
//! HTTP surface of SMART-TDAH, built on axum.
//!
//! [`router`] wires every route to its handler. Handlers authenticate through
//! the extractors in [`extract`], validate input, then borrow one connection
//! from the shared [`TdahDb`](tdah_db::TdahDb) for the rest of the request.
//! Every failure converges into [`error::ApiError`].

pub mod assistant;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, patch, post};
use tdah_config::ConfigError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    use routes::{account, assistant, health, links, students, teachers};

    Router::new()
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/profile", get(account::profile))
        .route("/change-password", post(account::change_password))
        .route("/alumnos", get(students::list_students))
        .route("/alumnos/", get(students::list_students))
        .route("/alumnos/{id}", get(students::student_stats))
        .route("/add-alumnos/buscar", get(students::search_students))
        .route(
            "/profesor-alumno",
            post(links::link_student).delete(links::unlink_student),
        )
        .route("/profesores", get(teachers::list_teachers))
        .route("/profesores/{id}", delete(teachers::delete_teacher))
        .route("/profesores/{id}/permiso", patch(teachers::set_permission))
        .route("/api/gemini/ask", post(assistant::ask))
        .route("/test-db", get(health::test_db))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy admitting the frontend origin with credentials.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidValue {
        field: "server.frontend_origin".to_string(),
        reason: e.to_string(),
    })?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]))
}

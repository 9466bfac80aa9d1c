//! JSON response bodies returned by the HTTP API.
//!
//! Shared here so the integration tests can deserialize exactly what the
//! server serializes.

use serde::{Deserialize, Serialize};

use crate::entities::Student;
use crate::enums::Role;

/// Response from `GET /alumnos/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentPage {
    pub alumnos: Vec<Student>,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

/// Response from `GET /add-alumnos/buscar`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentSearchResponse {
    pub alumnos: Vec<Student>,
}

/// Response from `POST /signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Response from `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub rol: Role,
    pub nombre: String,
    pub apellidos: String,
    pub id: i64,
}

/// Plain confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response from `POST /api/gemini/ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub text: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

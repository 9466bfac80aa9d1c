use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("Unauthorized")]
    Missing,

    /// Bad signature, malformed token, wrong scheme, or expired.
    #[error("Invalid or expired token")]
    Invalid,

    /// The token verified but carries no usable id or role.
    #[error("Token is missing identity claims")]
    IncompleteClaims,

    /// Authenticated, but the role may not perform this operation.
    #[error("Forbidden: Admins only")]
    Forbidden,

    /// Email/password pair did not match a principal.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

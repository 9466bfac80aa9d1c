use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tdah_core::entities::Principal;

use crate::bearer::bearer_token;
use crate::claims::{IssuedClaims, normalize};
use crate::error::AuthError;

/// Upper bound on token lifetime (ten years), keeping `exp` arithmetic in range.
const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 3600;

/// Issues and resolves HS256 bearer tokens.
///
/// Built once from configuration and shared by every request; holds no
/// mutable state.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenService {
    /// `ttl_secs` is the absolute lifetime of issued tokens.
    #[must_use]
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: TimeDelta::seconds(i64::try_from(ttl_secs).map_or(MAX_TTL_SECS, |s| s.min(MAX_TTL_SECS))),
        }
    }

    /// Issue a token for `principal`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if it were `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = IssuedClaims {
            user_id: principal.id,
            rol: principal.role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the raw claim set.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for any verification failure.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, AuthError> {
        jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                    other => tracing::debug!(reason = ?other, "rejected token"),
                }
                AuthError::Invalid
            })
    }

    /// Resolve an `Authorization` header value to a [`Principal`].
    ///
    /// # Errors
    ///
    /// `Missing` without a token, `Invalid` when verification fails,
    /// `IncompleteClaims` when the verified claims lack an id or role.
    pub fn resolve(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let token = bearer_token(authorization)?;
        let claims = self.verify(token)?;
        normalize(&claims)
    }
}

/// Admit only admin principals.
///
/// # Errors
///
/// Returns `AuthError::Forbidden` for any other role.
pub fn require_admin(principal: Principal) -> Result<Principal, AuthError> {
    if principal.role.is_admin() {
        Ok(principal)
    } else {
        Err(AuthError::Forbidden)
    }
}

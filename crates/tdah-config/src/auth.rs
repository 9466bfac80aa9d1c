//! Token signing configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default token lifetime: one hour.
const fn default_token_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 tokens. Required.
    #[serde(default)]
    pub jwt_secret: String,

    /// Absolute lifetime of an issued token, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// Fail fast when the server cannot sign or verify tokens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if the secret is empty, or
    /// `ConfigError::InvalidValue` if the lifetime is zero.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(self)
    }
}

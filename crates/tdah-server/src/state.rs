use std::sync::Arc;

use tdah_auth::TokenService;
use tdah_config::{ConfigError, DirectoryConfig, TdahConfig};
use tdah_db::TdahDb;

use crate::assistant::AssistantClient;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<TdahDb>,
    pub tokens: Arc<TokenService>,
    pub directory: DirectoryConfig,
    pub assistant: Arc<AssistantClient>,
}

impl AppState {
    /// Build state from loaded configuration and an open database.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the auth section is unusable.
    pub fn new(db: TdahDb, config: &TdahConfig) -> Result<Self, ConfigError> {
        let auth = config.auth.require()?;
        Ok(Self {
            db: Arc::new(db),
            tokens: Arc::new(TokenService::new(&auth.jwt_secret, auth.token_ttl_secs)),
            directory: config.directory.clone(),
            assistant: Arc::new(AssistantClient::new(config.assistant.clone())),
        })
    }
}

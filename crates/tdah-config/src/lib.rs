//! # tdah-config
//!
//! Layered configuration loading for SMART-TDAH using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TDAH_*` prefix, `__` as separator)
//! 2. Project-level `.smart-tdah/config.toml`
//! 3. User-level `~/.config/smart-tdah/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TDAH_AUTH__JWT_SECRET` -> `auth.jwt_secret`,
//! `TDAH_SERVER__PORT` -> `server.port`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tdah_config::TdahConfig;
//!
//! let config = TdahConfig::load_with_dotenv().expect("config");
//! config.auth.require().expect("JWT secret must be set");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod assistant;
mod auth;
mod database;
mod directory;
mod error;
mod server;

pub use assistant::AssistantConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TDAH_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TdahConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl TdahConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".smart-tdah/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smart-tdah").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TdahConfig::default();
        assert!(!config.auth.is_configured());
        assert!(!config.assistant.is_configured());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "smart-tdah.db");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TdahConfig = TdahConfig::figment().extract()?;
            assert_eq!(config.directory.default_page_size, 16);
            assert_eq!(config.auth.token_ttl_secs, 3600);
            Ok(())
        });
    }
}

//! Local libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from("smart-tdah.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the database file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

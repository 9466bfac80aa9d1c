//! Generative-language assistant configuration.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    String::from("gemini-2.0-flash")
}

fn default_base_url() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// API key sent as `X-goog-api-key`. Empty disables the assistant.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn generate_url(&self) -> String {
        self.generate_url_for(&self.model)
    }

    /// `generateContent` URL for an explicitly chosen model.
    #[must_use]
    pub fn generate_url_for(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

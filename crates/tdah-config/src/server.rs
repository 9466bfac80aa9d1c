//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    String::from("localhost")
}

const fn default_port() -> u16 {
    5000
}

fn default_frontend_origin() -> String {
    String::from("http://localhost:3000")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Single origin allowed by CORS (the React frontend).
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_origin: default_frontend_origin(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "localhost:5000");
        assert_eq!(config.frontend_origin, "http://localhost:3000");
    }
}

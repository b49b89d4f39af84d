//! Configuration management

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds
    pub session_ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API key for the generative-text backend; the assistant endpoint
    /// reports 503 when this is unset.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://postgres@localhost/lynix".to_string(),
            },
            auth: AuthConfig {
                session_ttl_seconds: 86_400,
            },
            assistant: AssistantConfig {
                api_key: None,
                model: "gemini-2.5-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(host) = std::env::var("LYNIX_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("LYNIX_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(ttl) = std::env::var("LYNIX_SESSION_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse() {
                config.auth.session_ttl_seconds = ttl;
            }
        }
        if let Ok(key) = std::env::var("API_KEY") {
            if !key.is_empty() {
                config.assistant.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("LYNIX_ASSISTANT_MODEL") {
            config.assistant.model = model;
        }
        if let Ok(base_url) = std::env::var("LYNIX_ASSISTANT_BASE_URL") {
            config.assistant.base_url = base_url;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.session_ttl_seconds, 86_400);
        assert!(config.assistant.api_key.is_none());
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
    }
}

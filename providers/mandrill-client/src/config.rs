use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Base URL of the Mandrill HTTP API.
pub const MANDRILL_URL: &str = "https://mandrillapp.com/api/1.0/";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration. Filled with defaults at construction and immutable
/// for the client's lifetime afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandrillConfig {
    /// API key sent with every request. Required unless `enabled` is false.
    #[serde(default)]
    pub api_key: Option<String>,
    /// When false the client is in dummy mode: no network calls are made
    /// and a synthetic empty response is returned.
    pub enabled: bool,
    pub request_timeout_ms: u64,
    /// Must end with a slash; endpoint paths are appended verbatim.
    pub base_url: String,
    /// Sender address merged into messages that carry none.
    #[serde(default)]
    pub default_from_email: Option<String>,
    /// Sender name merged into messages that carry none.
    #[serde(default)]
    pub default_from_name: Option<String>,
}

impl Default for MandrillConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            enabled: true,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            base_url: MANDRILL_URL.to_string(),
            default_from_email: None,
            default_from_name: None,
        }
    }
}

impl MandrillConfig {
    /// Configuration for a live client with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Dummy-mode configuration; no API key required, no network calls made.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("enabled", true)?
            .set_default("request_timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("base_url", MANDRILL_URL)?;

        // Try to load from config file if it exists
        if let Ok(config_path) = env::var("MANDRILL_CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path));
        }

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix("MANDRILL")
                .separator("__")
                .try_parsing(true),
        );

        // API key must come from environment
        if let Ok(api_key) = env::var("MANDRILL_API_KEY") {
            builder = builder.set_override("api_key", api_key)?;
        }

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err("An API key is required while the client is enabled".to_string());
        }

        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if !self.base_url.ends_with('/') {
            return Err(format!(
                "Base URL must end with a slash: {}",
                self.base_url
            ));
        }

        Ok(())
    }
}

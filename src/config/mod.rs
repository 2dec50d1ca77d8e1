use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub delivery: DeliveryConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub session_page_limit: u32,
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SyncConfig {
    /// ISO-8601 instant; sessions created earlier are never synced.
    pub cutoff: String,
    pub interval_secs: u64,
    pub initial_delay_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeliveryConfig {
    /// Chat session that owns the spreadsheet-append tool.
    pub channel_id: Option<String>,
    pub tool_name: String,
    pub success_marker: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ExtractionConfig {
    pub save_function: String,
    pub append_function_prefix: String,
    pub min_user_turns: usize,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Stricter check for commands that call the remote API.
    pub fn validate_for_network(&self) -> Result<()> {
        self.validate()?;
        validation::validate_credentials(&self.api)
    }

    pub fn delivery_channel(&self) -> Option<&str> {
        self.delivery
            .channel_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn is_scheduling_enabled(&self) -> bool {
        self.sync.interval_secs > 0 && self.delivery_channel().is_some()
    }

    pub fn cutoff(&self) -> &str {
        &self.sync.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_channel_ignores_blank_values() {
        let mut config = defaults::default_config();
        assert_eq!(config.delivery_channel(), None);

        config.delivery.channel_id = Some("   ".to_string());
        assert_eq!(config.delivery_channel(), None);

        config.delivery.channel_id = Some(" chat-123 ".to_string());
        assert_eq!(config.delivery_channel(), Some("chat-123"));
    }

    #[test]
    fn test_scheduling_requires_interval_and_channel() {
        let mut config = defaults::default_config();
        assert!(!config.is_scheduling_enabled());

        config.delivery.channel_id = Some("chat-123".to_string());
        assert!(config.is_scheduling_enabled());

        config.sync.interval_secs = 0;
        assert!(!config.is_scheduling_enabled());
    }

    #[test]
    fn test_validate_for_network_requires_api_key() {
        let mut config = defaults::default_config();
        assert!(config.validate().is_ok());
        assert!(config.validate_for_network().is_err());

        config.api.api_key = "secret".to_string();
        assert!(config.validate_for_network().is_ok());
    }

    #[test]
    fn test_config_json_roundtrip_keeps_optional_channel() {
        let mut config = defaults::default_config();
        config.delivery.channel_id = Some("chat-42".to_string());

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.delivery_channel(), Some("chat-42"));
        assert_eq!(parsed.sync.cutoff, config.sync.cutoff);
    }
}

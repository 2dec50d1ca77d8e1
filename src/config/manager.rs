use super::defaults::{default_config, get_config_file_path};
use super::{Config, ConfigError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const ENV_API_KEY: &str = "VAPI_API_KEY";
pub const ENV_API_URL: &str = "VAPI_API_URL";
pub const ENV_DELIVERY_CHANNEL: &str = "VAPI_BACKFILL_SESSION_ID";
pub const ENV_SYNC_INTERVAL_MS: &str = "SYNC_INTERVAL_MS";

pub struct ConfigManager;

impl ConfigManager {
    /// Load the file (writing defaults if absent), then layer environment overrides on top.
    pub fn load_or_create_with_path(config_path: Option<&Path>) -> Result<Config> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => get_config_file_path(),
        };

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let config = default_config();
            Self::save_to_path(&config, &config_path)?;
            config
        };

        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let mut file = fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}

/// Environment wins over the file. Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(api_key) = lookup(ENV_API_KEY) {
        config.api.api_key = api_key;
    }

    if let Some(base_url) = lookup(ENV_API_URL) {
        config.api.base_url = base_url;
    }

    if let Some(channel) = lookup(ENV_DELIVERY_CHANNEL) {
        config.delivery.channel_id = Some(channel);
    }

    if let Some(interval) = lookup(ENV_SYNC_INTERVAL_MS) {
        let millis: u64 = interval.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "{} must be a whole number of milliseconds, got '{}'",
                ENV_SYNC_INTERVAL_MS, interval
            ))
        })?;
        // Zero keeps scheduling off; any other value rounds up to whole seconds.
        config.sync.interval_secs = millis.div_ceil(1000);
    }

    Ok(())
}

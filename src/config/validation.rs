use super::{ApiConfig, Config, ConfigError, DeliveryConfig, ExtractionConfig, Result, SyncConfig};
use chrono::DateTime;

pub const MAX_SESSION_PAGE_LIMIT: u32 = 1000;

pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_config(&config.api)?;
    validate_sync_config(&config.sync)?;
    validate_delivery_config(&config.delivery)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

pub fn validate_api_config(api: &ApiConfig) -> Result<()> {
    let base_url = api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Validation(
            "API base URL cannot be empty".to_string(),
        ));
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "API base URL must start with http:// or https://, got '{}'",
            base_url
        )));
    }

    if api.session_page_limit == 0 || api.session_page_limit > MAX_SESSION_PAGE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "Session page limit must be between 1 and {}",
            MAX_SESSION_PAGE_LIMIT
        )));
    }

    if api.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "Request timeout must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_credentials(api: &ApiConfig) -> Result<()> {
    if api.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "API key is not set (configure api.api_key or VAPI_API_KEY)".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_sync_config(sync: &SyncConfig) -> Result<()> {
    // Cutoff comparisons stay lexicographic, so only a canonical instant is accepted.
    DateTime::parse_from_rfc3339(&sync.cutoff).map_err(|e| {
        ConfigError::Validation(format!(
            "Sync cutoff '{}' is not an RFC 3339 timestamp: {}",
            sync.cutoff, e
        ))
    })?;

    if !sync.cutoff.ends_with('Z') {
        return Err(ConfigError::Validation(format!(
            "Sync cutoff '{}' must be expressed in UTC with a trailing 'Z'",
            sync.cutoff
        )));
    }

    Ok(())
}

pub fn validate_delivery_config(delivery: &DeliveryConfig) -> Result<()> {
    if delivery.tool_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Delivery tool name cannot be empty".to_string(),
        ));
    }

    if delivery.success_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Delivery success marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_extraction_config(extraction: &ExtractionConfig) -> Result<()> {
    if extraction.save_function.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Save function name cannot be empty".to_string(),
        ));
    }

    if extraction.append_function_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Append function prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&default_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = default_config();
        config.api.base_url = "ftp://api.vapi.ai".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http://"));

        config.api.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_page_limit_bounds() {
        let mut config = default_config();
        config.api.session_page_limit = 0;
        assert!(validate_config(&config).is_err());

        config.api.session_page_limit = MAX_SESSION_PAGE_LIMIT + 1;
        assert!(validate_config(&config).is_err());

        config.api.session_page_limit = MAX_SESSION_PAGE_LIMIT;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_cutoff_must_be_utc_rfc3339() {
        let mut config = default_config();
        config.sync.cutoff = "yesterday".to_string();
        assert!(validate_config(&config).is_err());

        config.sync.cutoff = "2026-02-27T00:30:00+01:00".to_string();
        assert!(validate_config(&config).is_err());

        config.sync.cutoff = "2026-03-01T12:00:00.000Z".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_channel_is_not_a_validation_error() {
        let mut config = default_config();
        config.delivery.channel_id = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_function_names_rejected() {
        let mut config = default_config();
        config.extraction.save_function = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = default_config();
        config.delivery.tool_name = " ".to_string();
        assert!(validate_config(&config).is_err());
    }
}

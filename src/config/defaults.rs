use super::{ApiConfig, Config, DeliveryConfig, ExtractionConfig, SyncConfig};

pub const DEFAULT_API_URL: &str = "https://api.vapi.ai";
pub const DEFAULT_SYNC_CUTOFF: &str = "2026-02-27T00:30:00Z";
pub const DEFAULT_TOOL_NAME: &str = "append_lead_row_v2";
pub const DEFAULT_SUCCESS_MARKER: &str = "updatedRows";

pub fn default_config() -> Config {
    Config {
        api: default_api_config(),
        sync: default_sync_config(),
        delivery: default_delivery_config(),
        extraction: default_extraction_config(),
    }
}

pub fn default_api_config() -> ApiConfig {
    ApiConfig {
        base_url: DEFAULT_API_URL.to_string(),
        api_key: String::new(),
        session_page_limit: 100,
        request_timeout_secs: 30,
    }
}

pub fn default_sync_config() -> SyncConfig {
    SyncConfig {
        cutoff: DEFAULT_SYNC_CUTOFF.to_string(),
        interval_secs: 300,
        initial_delay_secs: 30,
    }
}

pub fn default_delivery_config() -> DeliveryConfig {
    DeliveryConfig {
        channel_id: None,
        tool_name: DEFAULT_TOOL_NAME.to_string(),
        success_marker: DEFAULT_SUCCESS_MARKER.to_string(),
    }
}

pub fn default_extraction_config() -> ExtractionConfig {
    ExtractionConfig {
        save_function: "saveLead".to_string(),
        append_function_prefix: "append_lead_row".to_string(),
        min_user_turns: 4,
    }
}

pub fn get_default_config_dir() -> std::path::PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "leadsync") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(".config")
            .join("leadsync")
    }
}

pub fn get_config_file_path() -> std::path::PathBuf {
    if let Ok(config_path) = std::env::var("LEADSYNC_CONFIG_PATH") {
        return std::path::PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}

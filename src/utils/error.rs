use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadSyncError {
    /// Listing sessions failed. Aborts the whole pass.
    #[error("Failed to fetch sessions: {0}")]
    Fetch(String),

    /// Submitting a lead to the delivery channel failed at the transport level.
    #[error("Delivery transport error: {0}")]
    DeliveryTransport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeadSyncError>;

impl LeadSyncError {
    pub fn fetch_error(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn delivery_error(msg: impl Into<String>) -> Self {
        Self::DeliveryTransport(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

impl From<crate::config::ConfigError> for LeadSyncError {
    fn from(error: crate::config::ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

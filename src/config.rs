//! Client Configuration
//!
//! Settings for the hosted data service and presence channel, read once
//! from the environment at startup and passed into the clients explicitly.

use thiserror::Error;

pub const ENV_DATA_URL: &str = "RETROBOARD_DATA_URL";
pub const ENV_DATA_KEY: &str = "RETROBOARD_DATA_KEY";
pub const ENV_PRESENCE_KEY: &str = "RETROBOARD_PRESENCE_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

/// Hosted-service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the hosted data service
    pub data_service_url: String,
    /// API key sent with every data-service request
    pub data_service_key: String,
    /// Public key for the presence channel; empty disables remote presence
    pub presence_public_key: String,
}

impl AppConfig {
    pub fn new(data_service_url: impl Into<String>, data_service_key: impl Into<String>) -> Self {
        Self {
            data_service_url: data_service_url.into(),
            data_service_key: data_service_key.into(),
            presence_public_key: String::new(),
        }
    }

    /// Read configuration from the environment. The data-service settings
    /// are required; the presence key falls back to empty like the original
    /// client setup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_service_url =
            std::env::var(ENV_DATA_URL).map_err(|_| ConfigError::MissingVar(ENV_DATA_URL))?;
        let data_service_key =
            std::env::var(ENV_DATA_KEY).map_err(|_| ConfigError::MissingVar(ENV_DATA_KEY))?;
        let presence_public_key = std::env::var(ENV_PRESENCE_KEY).unwrap_or_default();
        Ok(Self {
            data_service_url,
            data_service_key,
            presence_public_key,
        })
    }
}

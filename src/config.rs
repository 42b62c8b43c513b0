//! Application configuration
//!
//! Central configuration for the gateway URL and channel sizing.

use crate::{CharlaError, Result};

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "CHARLA_API_URL";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the complete application
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the backend gateway (no trailing slash)
    pub api_url: String,

    /// Capacity of the command/event channels to the gateway worker
    pub channel_capacity: usize,

    /// Capacity of the microphone sample channel
    pub sample_channel_capacity: usize,

    /// Whether to enable microphone capture
    pub enable_audio_input: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            channel_capacity: 100,
            sample_channel_capacity: 1000,
            enable_audio_input: true,
        }
    }
}

impl AppConfig {
    /// Create a configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = url;
        }
        config
    }

    /// Set the backend base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Disable microphone capture (text-only mode)
    pub fn without_audio_input(mut self) -> Self {
        self.enable_audio_input = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(CharlaError::Config("API URL is required".to_string()));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(CharlaError::Config(format!(
                "API URL must be http(s): {}",
                self.api_url
            )));
        }
        if self.channel_capacity == 0 {
            return Err(CharlaError::Config(
                "Channel capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.enable_audio_input);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_api_url("https://example.test/")
            .without_audio_input();

        assert!(!config.enable_audio_input);
        assert_eq!(config.base_url(), "https://example.test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = AppConfig::default().with_api_url("ftp://nope");
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_api_url("");
        assert!(config.validate().is_err());
    }
}

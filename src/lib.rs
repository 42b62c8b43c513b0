pub mod audio;
pub mod config;
pub mod conversation;
pub mod gateway;
pub mod render;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CharlaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CharlaError {
    fn from(e: std::io::Error) -> Self {
        CharlaError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for CharlaError {
    fn from(e: reqwest::Error) -> Self {
        CharlaError::Network(e.to_string())
    }
}

impl CharlaError {
    /// Get a user-friendly description for the status line
    pub fn user_message(&self) -> String {
        match self {
            CharlaError::Network(_) => {
                "Could not reach the server. The operation was not applied.".to_string()
            }
            CharlaError::DeviceUnavailable(_) => {
                "Microphone unavailable. Please check your audio input device.".to_string()
            }
            CharlaError::Validation(_) => "Nothing to send.".to_string(),
            CharlaError::Capture(_) => "A recording is already in progress.".to_string(),
            CharlaError::Channel(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            CharlaError::Config(_) => "Configuration error. Please check settings.".to_string(),
            CharlaError::Io(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CharlaError>;

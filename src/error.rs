//! Error types for the pan_session crate.

use thiserror::Error;

/// Errors that can occur when talking to the drive or the local config.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Failed to read config file: {0}")]
    ConfigFileError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No file paths given")]
    NoPathsGiven,

    #[error("No active user in config")]
    NoActiveUser,

    #[error("Config directory could not be determined")]
    NoConfigDir,

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),

    #[error("Invalid expire time: {0}")]
    InvalidExpireTime(String),
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;

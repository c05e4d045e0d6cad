//! Error types for core module
//!
//! Failures while resolving the session configuration. Any of these stops
//! the binary before the engine is launched.

use thiserror::Error;

/// Errors raised while loading, saving or checking settings
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file could not be read or written
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings file is not valid settings JSON
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// A value is out of range for a session
    #[error("Invalid setting: {message}")]
    InvalidSetting { message: String },
}

/// Result type alias for settings operations
pub type CoreResult<T> = Result<T, CoreError>;

//! Error types for the UIDAI analytics workspace

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UidaiError {
    // Query errors
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // Dataset errors
    #[error("Data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("Dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid record in {source_name} at line {line}: {reason}")]
    InvalidRecord {
        source_name: String,
        line: u64,
        reason: String,
    },

    #[error("Unknown state or union territory: '{name}'")]
    UnknownState { name: String },

    #[error("Invalid pincode '{value}': expected exactly 6 digits")]
    InvalidPincode { value: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl UidaiError {
    /// Shorthand for a rejected query parameter
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller rather than the data
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

impl From<serde_json::Error> for UidaiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UidaiError>;

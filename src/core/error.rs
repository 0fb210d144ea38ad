//! Error types for core module
//!
//! Provides custom error types for preference storage and serialization.
//! Neither is fatal: callers log them and carry on with defaults.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backing store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    /// Preferences serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

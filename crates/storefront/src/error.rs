//! Unified error handling.
//!
//! Each module owns its error enum; `AppError` wraps them for callers that
//! drive several modules at once, such as the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::router::NavigationError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Navigation was abandoned.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

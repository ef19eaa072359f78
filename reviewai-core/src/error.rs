//! Error types for ReviewAI

use thiserror::Error;

/// Result type alias for ReviewAI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ReviewAI operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Completion service error
    #[error("Completion error: {0}")]
    Completion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report rendering error
    #[error("Render error: {0}")]
    Render(String),
}

//! Error types for the exchange-rate bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {

    // =============================
    // Core Errors
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("LINE API error: {0}")]
    LineApiError(String),

    #[error("Rate fetch error: {0}")]
    RateFetchError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//! Error types for Speida.

use thiserror::Error;

/// Library-level error type for Speida operations.
#[derive(Error, Debug)]
pub enum SpeidaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scrape failed: {0}")]
    Scrape(String),

    #[error("Transcript fetch failed: {0}")]
    Transcript(String),

    #[error("Caption lookup failed: {0}")]
    Captions(String),

    #[error("Video search failed: {0}")]
    VideoSearch(String),

    #[error("Profile fetch failed: {0}")]
    Profile(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Speida operations.
pub type Result<T> = std::result::Result<T, SpeidaError>;

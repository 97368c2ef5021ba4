//! Error types for Vidask.

use thiserror::Error;

/// Library-level error type for Vidask operations.
#[derive(Error, Debug)]
pub enum VidaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unrecognized video reference: {0:?}. Paste a valid YouTube URL or the 11-character video id.")]
    UnrecognizedReference(String),

    #[error("Transcript unavailable for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Transcript service request failed: {0}")]
    TranscriptService(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("No index has been built for this session")]
    IndexNotBuilt,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Vidask operations.
pub type Result<T> = std::result::Result<T, VidaskError>;

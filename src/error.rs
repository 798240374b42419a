// Error types for review-console.
// Covers transport, decoding, server-reported, validation, and startup errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    /// Server answered with `success: false`.
    #[error("{0}")]
    Application(String),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ConsoleError {
    /// True for errors caught before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

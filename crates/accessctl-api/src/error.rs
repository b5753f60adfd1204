//! Error types for the authorization API client.

use thiserror::Error;

/// Result type alias using the API client [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Authorization API client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the server
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential loading error
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

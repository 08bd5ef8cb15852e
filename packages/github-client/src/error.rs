//! Error types for the GitHub client.

use thiserror::Error;

/// Result type for GitHub client operations.
pub type Result<T> = std::result::Result<T, GitHubError>;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("GitHub API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Search query rejected before sending
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
}

//! Error types for the OpenAI client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("OpenAI API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not the expected JSON, or held no answer
    #[error("Parse error: {0}")]
    Parse(String),
}

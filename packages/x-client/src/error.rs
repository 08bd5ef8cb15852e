use thiserror::Error;

pub type Result<T> = std::result::Result<T, XError>;

#[derive(Debug, Error)]
pub enum XError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("X API error {status}: {message}")]
    Api { status: u16, message: String },

    /// 429 with the reset time from `x-rate-limit-reset`, when present
    #[error("rate limited (resets at {reset:?})")]
    RateLimited { reset: Option<i64> },
}

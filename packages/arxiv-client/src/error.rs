use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArxivError>;

#[derive(Debug, Error)]
pub enum ArxivError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status, or an error entry inside a 200 feed
    #[error("arXiv API error: {0}")]
    Api(String),

    #[error("feed parse error: {0}")]
    Parse(String),
}

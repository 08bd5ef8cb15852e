//! Pure arXiv API client.
//!
//! Wraps the public `export.arxiv.org/api/query` endpoint and turns its Atom
//! feed into [`Paper`] values. No authentication is required; arXiv asks
//! clients to keep to roughly one request every three seconds, which callers
//! are expected to respect.
//!
//! # Example
//!
//! ```rust,ignore
//! use arxiv_client::{ArxivClient, SearchQuery, SortBy, SortOrder};
//!
//! let client = ArxivClient::new();
//! let query = SearchQuery::all("decentralized science")
//!     .max_results(10)
//!     .sort(SortBy::SubmittedDate, SortOrder::Descending);
//! for paper in client.search(&query).await? {
//!     println!("{}: {}", paper.arxiv_id(), paper.title);
//! }
//! ```

pub mod error;
pub mod feed;
pub mod types;

pub use error::{ArxivError, Result};
pub use feed::parse_feed;
pub use types::{Paper, SearchQuery, SortBy, SortOrder};

const BASE_URL: &str = "http://export.arxiv.org/api/query";

#[derive(Clone)]
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArxivClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn query_url(&self, query: &SearchQuery) -> String {
        format!("{}?{}", self.base_url, query.to_query_string())
    }

    /// Run a query and parse the returned feed.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>> {
        let url = self.query_url(query);
        tracing::debug!(search_query = %query.search_query, "Querying arXiv");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ArxivError::Api(format!("{}: {}", status, body)));
        }

        let papers = parse_feed(&body)?;
        tracing::debug!(
            search_query = %query.search_query,
            count = papers.len(),
            "arXiv query complete"
        );
        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url() {
        let client = ArxivClient::new().with_base_url("http://localhost:8000/api/query");
        let url = client.query_url(&SearchQuery::all("dao").max_results(3));
        assert_eq!(
            url,
            "http://localhost:8000/api/query?search_query=all%3Adao&start=0&max_results=3"
        );
    }
}

//! Pure GitHub REST API client.
//!
//! Covers the repository search endpoint only. Unauthenticated requests work
//! but are limited to 10 searches per minute; pass a token to raise the limit.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_client::{GitHubClient, RepoSearch, RepoSort, SortOrder};
//!
//! let client = GitHubClient::new();
//! let search = RepoSearch::new("DeSci").sort(RepoSort::Stars, SortOrder::Desc);
//! for repo in client.search_repositories(&search).await? {
//!     println!("{} ({} stars)", repo.full_name, repo.stargazers_count);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{GitHubError, Result};
pub use types::{License, RepoSearch, RepoSort, Repository, SearchResponse, SortOrder};

const BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "desci-explorer/0.1";

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            token: None,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Point at a different API root (GitHub Enterprise, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn search_url(&self, search: &RepoSearch) -> String {
        format!(
            "{}/search/repositories?{}",
            self.base_url,
            search.to_query_string()
        )
    }

    /// Run a single repository search and return the first page of results.
    pub async fn search_repositories(&self, search: &RepoSearch) -> Result<Vec<Repository>> {
        if search.terms.trim().is_empty() {
            return Err(GitHubError::InvalidQuery("empty search terms".into()));
        }

        let url = self.search_url(search);
        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse<Repository> = resp.json().await?;
        if parsed.incomplete_results {
            tracing::debug!(q = %search.q(), "GitHub search returned incomplete results");
        }
        tracing::debug!(
            q = %search.q(),
            total = parsed.total_count,
            returned = parsed.items.len(),
            "GitHub repository search complete"
        );

        Ok(parsed.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_uses_base_url() {
        let client = GitHubClient::new().with_base_url("http://localhost:9000/");
        let url = client.search_url(&RepoSearch::new("DeSci").per_page(5));
        assert_eq!(url, "http://localhost:9000/search/repositories?q=DeSci&per_page=5");
    }

    #[tokio::test]
    async fn test_empty_terms_rejected_without_request() {
        let client = GitHubClient::new().with_base_url("http://127.0.0.1:1");
        let err = client
            .search_repositories(&RepoSearch::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::InvalidQuery(_)));
    }
}

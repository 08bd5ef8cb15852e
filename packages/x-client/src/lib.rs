//! Pure X (formerly Twitter) API v2 client.
//!
//! Only the recent-search endpoint is wrapped. Requires an app bearer token.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::{RecentSearch, XClient};
//!
//! let client = XClient::new(std::env::var("X_BEARER_TOKEN")?);
//! let resp = client.search_recent(&RecentSearch::hashtags(&["DeSci"])).await?;
//! for tweet in &resp.data {
//!     println!("@{}: {}", resp.author(tweet).map(|u| u.username.as_str()).unwrap_or("?"), tweet.text);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, XError};
pub use types::{Includes, Meta, RecentSearch, SearchResponse, Tweet, TweetMetrics, User, UserMetrics};

const BASE_URL: &str = "https://api.twitter.com/2";

#[derive(Clone)]
pub struct XClient {
    client: reqwest::Client,
    bearer_token: String,
    base_url: String,
}

impl XClient {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token: bearer_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn search_url(&self, search: &RecentSearch) -> String {
        format!("{}/tweets/search/recent?{}", self.base_url, search.to_query_string())
    }

    pub async fn search_recent(&self, search: &RecentSearch) -> Result<SearchResponse> {
        let resp = self
            .client
            .get(self.search_url(search))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let reset = resp
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(XError::RateLimited { reset });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(XError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = resp.json().await?;
        tracing::debug!(
            query = %search.query,
            count = parsed.meta.result_count,
            "X recent search complete"
        );
        Ok(parsed)
    }
}

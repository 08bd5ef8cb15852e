use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<TweetMetrics>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
    pub public_metrics: Option<UserMetrics>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct UserMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub result_count: u32,
    pub newest_id: Option<String>,
    pub next_token: Option<String>,
}

/// Raw body of `GET /2/tweets/search/recent`. `data` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub meta: Meta,
}

impl SearchResponse {
    pub fn author(&self, tweet: &Tweet) -> Option<&User> {
        let author_id = tweet.author_id.as_deref()?;
        self.includes.users.iter().find(|u| u.id == author_id)
    }
}

/// Recent-search request (last seven days of posts).
#[derive(Debug, Clone)]
pub struct RecentSearch {
    pub query: String,
    pub max_results: u8,
}

impl RecentSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 10,
        }
    }

    /// OR together a set of hashtags, excluding retweets.
    pub fn hashtags(tags: &[&str]) -> Self {
        let joined = tags
            .iter()
            .map(|t| {
                let t = t.trim();
                if t.starts_with('#') {
                    t.to_string()
                } else {
                    format!("#{}", t)
                }
            })
            .collect::<Vec<_>>()
            .join(" OR ");
        Self::new(format!("({}) -is:retweet", joined))
    }

    /// The endpoint accepts 10..=100.
    pub fn max_results(mut self, max_results: u8) -> Self {
        self.max_results = max_results.clamp(10, 100);
        self
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "query={}&max_results={}&tweet.fields=created_at,public_metrics,author_id&expansions=author_id&user.fields=name,username,description,profile_image_url,public_metrics",
            urlencoding::encode(&self.query),
            self.max_results
        )
    }
}

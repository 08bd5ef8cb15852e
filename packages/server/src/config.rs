use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Enables LLM enrichment and the research assistant when present
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub github_token: Option<String>,
    /// Live social search; the curated feed is served without it
    pub x_bearer_token: Option<String>,
    /// Validity window of the aggregated project cache
    pub cache_ttl_secs: u64,
    /// Per-request timeout applied to every provider HTTP client
    pub provider_timeout_secs: u64,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            github_token: non_empty_var("GITHUB_TOKEN"),
            x_bearer_token: non_empty_var("X_BEARER_TOKEN"),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("CACHE_TTL_SECS must be a whole number of seconds")?,
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://desci.example ,,"),
            vec!["http://localhost:3000", "https://desci.example"]
        );
        assert!(parse_origins("").is_empty());
    }
}

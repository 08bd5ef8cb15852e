//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container handed to the HTTP
//! layer. External services sit behind `ProjectProvider` / `BaseAI` so tests
//! can swap in mocks.

use anyhow::{Context, Result};
use arxiv_client::ArxivClient;
use github_client::GitHubClient;
use std::sync::Arc;
use std::time::Duration;
use x_client::XClient;

use super::{BaseAI, Clock, OpenAIClient, SystemClock};
use crate::config::Config;
use crate::domains::assistant::ResearchAssistant;
use crate::domains::enrichment::ProjectEnricher;
use crate::domains::ledger::HetuLedger;
use crate::domains::projects::{ProjectAggregator, ProjectCache, ProjectProvider};
use crate::domains::sources::{ArxivProjectSource, GitHubProjectSource, SocialProjectSource};

const USER_AGENT: &str = concat!("desci-explorer/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ServerDeps {
    pub aggregator: Arc<ProjectAggregator>,
    pub ledger: Arc<HetuLedger>,
    pub enricher: ProjectEnricher,
    /// Absent when no language model is configured
    pub assistant: Option<ResearchAssistant>,
    /// Backs the paper listing route
    pub arxiv: ArxivClient,
    /// Backs the social posts route
    pub social: Arc<SocialProjectSource>,
    pub clock: Arc<dyn Clock>,
}

impl ServerDeps {
    /// Wire the domains together.
    ///
    /// Providers are registered as: submitted projects, then `sources` in the
    /// given order, then the Hetu registry. Merge order follows registration,
    /// so submissions always keep the front positions. `arxiv` and `social`
    /// back their own routes and are only providers when also in `sources`.
    pub fn new(
        sources: Vec<Arc<dyn ProjectProvider>>,
        ai: Option<Arc<dyn BaseAI>>,
        arxiv: ArxivClient,
        social: Arc<SocialProjectSource>,
        clock: Arc<dyn Clock>,
        cache: Arc<ProjectCache>,
    ) -> Self {
        let ledger = Arc::new(HetuLedger::new(clock.clone()));

        let mut providers: Vec<Arc<dyn ProjectProvider>> = Vec::with_capacity(sources.len() + 1);
        providers.extend(sources);
        providers.push(ledger.clone());

        let aggregator = Arc::new(ProjectAggregator::new(providers, cache, clock.clone()));

        Self {
            aggregator,
            ledger,
            enricher: ProjectEnricher::new(ai.clone()),
            assistant: ai.map(ResearchAssistant::new),
            arxiv,
            social,
            clock,
        }
    }

    /// Production wiring from the environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let mut github = GitHubClient::new().with_http_client(http.clone());
        if let Some(token) = &config.github_token {
            github = github.with_token(token);
        }

        let social = Arc::new(match &config.x_bearer_token {
            Some(token) => SocialProjectSource::live(
                XClient::new(token).with_http_client(http.clone()),
                clock.clone(),
            ),
            None => {
                tracing::info!("X_BEARER_TOKEN not set, serving curated social feed");
                SocialProjectSource::curated(clock.clone())
            }
        });

        let arxiv = ArxivClient::new().with_http_client(http.clone());

        let sources: Vec<Arc<dyn ProjectProvider>> = vec![
            Arc::new(GitHubProjectSource::new(github, clock.clone())),
            social.clone(),
            Arc::new(ArxivProjectSource::new(arxiv.clone(), clock.clone())),
        ];

        let ai: Option<Arc<dyn BaseAI>> = match &config.openai_api_key {
            Some(key) => {
                tracing::info!(model = %config.openai_model, "AI enrichment enabled");
                let client: Arc<dyn BaseAI> =
                    Arc::new(OpenAIClient::new(key, &config.openai_model).with_http_client(http));
                Some(client)
            }
            None => {
                tracing::info!("OPENAI_API_KEY not set, using heuristic enrichment");
                None
            }
        };

        let validity = chrono::Duration::seconds(
            i64::try_from(config.cache_ttl_secs).context("CACHE_TTL_SECS is out of range")?,
        );

        Ok(Self::new(
            sources,
            ai,
            arxiv,
            social,
            clock,
            Arc::new(ProjectCache::new(validity)),
        ))
    }
}

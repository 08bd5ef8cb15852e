//! Code-hosting provider: repository search on GitHub.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use github_client::{GitHubClient, RepoSearch, RepoSort, Repository, SortOrder};
use indexmap::IndexMap;
use std::sync::Arc;

use super::{collect_batches, log_points};
use crate::domains::enrichment::contains_word;
use crate::domains::projects::models::{Category, ProjectRecord, ProjectScores};
use crate::domains::projects::ProjectProvider;
use crate::kernel::Clock;

pub const DESCI_KEYWORDS: [&str; 5] = [
    "DeSci",
    "Decentralized Science",
    "Blockchain Research",
    "Open Science",
    "Science DAO",
];

const LANGUAGES: [&str; 4] = ["javascript", "typescript", "python", "solidity"];

const NO_DESCRIPTION: &str = "No description available";

pub struct GitHubProjectSource {
    client: GitHubClient,
    keywords: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl GitHubProjectSource {
    pub fn new(client: GitHubClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            keywords: DESCI_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            clock,
        }
    }

    fn search_for(keyword: &str) -> RepoSearch {
        LANGUAGES
            .iter()
            .fold(
                RepoSearch::new(keyword).qualifier("in:name,description,readme"),
                |search, lang| search.qualifier(format!("language:{}", lang)),
            )
            .sort(RepoSort::Stars, SortOrder::Desc)
    }

    fn to_record(&self, repo: &Repository) -> ProjectRecord {
        let description = repo
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION);

        ProjectRecord {
            id: repo.id,
            name: repo.name.clone(),
            description: description.to_string(),
            category: categorize_repository(repo),
            scores: score_repository(repo, self.clock.now()),
            url: repo.html_url.clone(),
            last_updated: repo.updated_at.date_naive(),
        }
    }
}

#[async_trait]
impl ProjectProvider for GitHubProjectSource {
    fn name(&self) -> &str {
        "github"
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        let searches: Vec<RepoSearch> = self.keywords.iter().map(|k| Self::search_for(k)).collect();
        let results = join_all(
            searches
                .iter()
                .map(|search| self.client.search_repositories(search)),
        )
        .await;

        let repos = collect_batches(self.name(), results)?;

        // Same repository can match several keywords
        let unique: IndexMap<i64, Repository> =
            repos.into_iter().map(|repo| (repo.id, repo)).collect();

        tracing::debug!(
            keywords = self.keywords.len(),
            repositories = unique.len(),
            "GitHub search complete"
        );

        Ok(unique.values().map(|repo| self.to_record(repo)).collect())
    }
}

/// Rule-based category from the description and topics.
pub fn categorize_repository(repo: &Repository) -> Category {
    let description = repo.description.as_deref().unwrap_or_default().to_lowercase();
    let has = |needle: &str| description.contains(needle);
    let topic = |name: &str| repo.topics.iter().any(|t| t.eq_ignore_ascii_case(name));

    if has("biology") || has("bio") || topic("biology") {
        Category::Biology
    } else if contains_word(&description, "ai") || has("artificial intelligence") || topic("ai") {
        Category::Ai
    } else if has("materials") || topic("materials-science") {
        Category::MaterialsScience
    } else if has("open access") || has("open science") || topic("open-access") {
        Category::OpenAccessResearch
    } else if has("climate") || topic("climate") {
        Category::ClimateScience
    } else if has("blockchain") && (has("science") || has("research")) {
        Category::BlockchainForScience
    } else {
        Category::OpenAccessResearch
    }
}

/// Deterministic scores from public repository signals. Every score starts
/// at 60 and earns up to 40 more.
///
/// - transparency: license, description, topics
/// - collaboration: forks and open issues
/// - funding: stars, as a proxy for backing
/// - engagement: recency of the last push and watchers; archived repos lose 20
pub fn score_repository(repo: &Repository, now: DateTime<Utc>) -> ProjectScores {
    let has_description = repo
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());

    let transparency = 60.0
        + if repo.license.is_some() { 20.0 } else { 0.0 }
        + if has_description { 10.0 } else { 0.0 }
        + if repo.topics.is_empty() { 0.0 } else { 10.0 };

    let collaboration = 60.0
        + (log_points(repo.forks_count, 10.0) + log_points(repo.open_issues_count, 5.0)).min(40.0);

    let funding = 60.0 + log_points(repo.stargazers_count, 10.0).min(40.0);

    let last_activity = repo.pushed_at.unwrap_or(repo.updated_at);
    let recency = match (now - last_activity).num_days() {
        d if d <= 30 => 25.0,
        d if d <= 90 => 15.0,
        d if d <= 365 => 5.0,
        _ => 0.0,
    };
    let mut engagement = 60.0 + recency + log_points(repo.watchers_count, 5.0).min(15.0);
    if repo.archived {
        engagement -= 20.0;
    }

    ProjectScores::from_f64(transparency, collaboration, funding, engagement)
}

//! Social-feed provider: DeSci accounts on X.
//!
//! With a bearer token this runs a recent search over the DeSci hashtags and
//! turns every author into a project record. Without one it serves a short
//! curated list. The same search backs the social posts feed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use x_client::{RecentSearch, SearchResponse, Tweet, TweetMetrics, User, XClient};

use super::log_points;
use crate::common::stable_id;
use crate::domains::enrichment::{categorize_keywords, FALLBACK_SCORE};
use crate::domains::projects::models::{Category, ProjectRecord, ProjectScores};
use crate::domains::projects::ProjectProvider;
use crate::kernel::Clock;

pub const DESCI_HASHTAGS: [&str; 5] = [
    "#DeSci",
    "#DecentralizedScience",
    "#BlockchainResearch",
    "#OpenScience",
    "#ScienceDAO",
];

const MAX_TWEETS: u8 = 100;

/// A post as shown in the social feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub likes: u64,
    pub retweets: u64,
    pub hashtags: Vec<String>,
    pub url: String,
}

enum Mode {
    Curated,
    Live(XClient),
}

pub struct SocialProjectSource {
    mode: Mode,
    clock: Arc<dyn Clock>,
}

impl SocialProjectSource {
    pub fn curated(clock: Arc<dyn Clock>) -> Self {
        Self {
            mode: Mode::Curated,
            clock,
        }
    }

    pub fn live(client: XClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            mode: Mode::Live(client),
            clock,
        }
    }

    /// Recent DeSci posts, newest first as X returns them.
    pub async fn recent_posts(&self) -> Result<Vec<SocialPost>> {
        match &self.mode {
            Mode::Curated => Ok(curated_posts()),
            Mode::Live(client) => Ok(tweets_to_posts(&search_desci(client).await?)),
        }
    }

    async fn search_live(&self, client: &XClient) -> Result<Vec<ProjectRecord>> {
        let response = search_desci(client).await?;
        Ok(authors_to_records(&response, self.clock.now().date_naive()))
    }
}

async fn search_desci(client: &XClient) -> Result<SearchResponse> {
    let search = RecentSearch::hashtags(&DESCI_HASHTAGS).max_results(MAX_TWEETS);
    let response = client
        .search_recent(&search)
        .await
        .context("X recent search failed")?;

    tracing::debug!(
        tweets = response.data.len(),
        users = response.includes.users.len(),
        "X search complete"
    );

    Ok(response)
}

#[async_trait]
impl ProjectProvider for SocialProjectSource {
    fn name(&self) -> &str {
        "social"
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        match &self.mode {
            Mode::Curated => Ok(curated_projects()),
            Mode::Live(client) => self.search_live(client).await,
        }
    }
}

/// One record per author, in order of their first tweet in the response.
/// Tweets without a resolvable author are skipped.
fn authors_to_records(response: &SearchResponse, today: NaiveDate) -> Vec<ProjectRecord> {
    let mut by_author: IndexMap<&str, (&User, Vec<&Tweet>)> = IndexMap::new();
    for tweet in &response.data {
        let Some(user) = response.author(tweet) else {
            continue;
        };
        by_author
            .entry(user.id.as_str())
            .or_insert_with(|| (user, Vec::new()))
            .1
            .push(tweet);
    }

    by_author
        .into_values()
        .map(|(user, tweets)| author_record(user, &tweets, today))
        .collect()
}

fn author_record(user: &User, tweets: &[&Tweet], today: NaiveDate) -> ProjectRecord {
    let bio = user
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let description = bio
        .map(String::from)
        .or_else(|| tweets.first().map(|t| t.text.clone()))
        .unwrap_or_default();

    let all_text = std::iter::once(description.as_str())
        .chain(tweets.iter().map(|t| t.text.as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    let totals = tweets
        .iter()
        .filter_map(|t| t.public_metrics)
        .fold(TweetMetrics::default(), |acc, m| TweetMetrics {
            retweet_count: acc.retweet_count + m.retweet_count,
            reply_count: acc.reply_count + m.reply_count,
            like_count: acc.like_count + m.like_count,
            quote_count: acc.quote_count + m.quote_count,
        });
    let followers = user
        .public_metrics
        .map(|m| m.followers_count)
        .unwrap_or_default();

    let scores = ProjectScores::from_f64(
        FALLBACK_SCORE as f64,
        60.0 + log_points(totals.retweet_count + totals.quote_count + totals.reply_count, 12.0)
            .min(40.0),
        60.0 + log_points(followers, 8.0).min(40.0),
        60.0 + log_points(totals.like_count, 12.0).min(40.0),
    );

    let last_updated = tweets
        .iter()
        .filter_map(|t| t.created_at)
        .max()
        .map(|at| at.date_naive())
        .unwrap_or(today);

    ProjectRecord {
        id: stable_id("x", &user.id),
        name: user.name.clone(),
        description,
        category: categorize_keywords(&all_text),
        scores,
        url: format!("https://x.com/{}", user.username),
        last_updated,
    }
}

/// Tweets without a resolvable author are skipped.
fn tweets_to_posts(response: &SearchResponse) -> Vec<SocialPost> {
    response
        .data
        .iter()
        .filter_map(|tweet| {
            let user = response.author(tweet)?;
            let metrics = tweet.public_metrics.unwrap_or_default();
            Some(SocialPost {
                id: tweet.id.clone(),
                text: tweet.text.clone(),
                created_at: tweet.created_at,
                username: user.username.clone(),
                display_name: user.name.clone(),
                profile_image_url: user.profile_image_url.clone(),
                likes: metrics.like_count,
                retweets: metrics.retweet_count,
                hashtags: hashtags(&tweet.text),
                url: format!("https://x.com/{}/status/{}", user.username, tweet.id),
            })
        })
        .collect()
}

/// `#tags` in `text`, in order of appearance, without the `#` or trailing
/// punctuation.
fn hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|word| word.strip_prefix('#'))
        .map(|tag| tag.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn curated_posts() -> Vec<SocialPost> {
    [
        (
            "1",
            "Excited to announce our new paper on decentralized science infrastructure! #DeSci #BlockchainResearch",
            (2023, 5, 15, 14, 30),
            "desci_labs",
            "DeSci Labs",
            (124, 45),
        ),
        (
            "2",
            "Just published our research on open peer review systems using blockchain technology. Read it here: https://example.com/paper #OpenScience #DeSci",
            (2023, 5, 14, 9, 15),
            "openscience",
            "Open Science Foundation",
            (89, 32),
        ),
        (
            "3",
            "How decentralized science is transforming research funding models. Thread 🧵 #DecentralizedScience #ScienceDAO",
            (2023, 5, 13, 18, 45),
            "sciencedao",
            "Science DAO",
            (156, 67),
        ),
        (
            "4",
            "Our latest research on using NFTs for scientific publishing is now available. We are revolutionizing how scientists share and get credit for their work! #DeSci #BlockchainResearch",
            (2023, 5, 12, 11, 20),
            "researchdao",
            "Research DAO",
            (78, 23),
        ),
        (
            "5",
            "Join our webinar on how decentralized science is democratizing access to research funding. Register now: https://example.com/webinar #OpenScience #DecentralizedScience",
            (2023, 5, 11, 15, 10),
            "sciencealliance",
            "Science Alliance",
            (45, 19),
        ),
    ]
    .into_iter()
    .map(|(id, text, (y, mo, d, h, mi), username, display_name, (likes, retweets))| SocialPost {
        id: id.into(),
        text: text.into(),
        created_at: Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single(),
        username: username.into(),
        display_name: display_name.into(),
        profile_image_url: None,
        likes,
        retweets,
        hashtags: hashtags(text),
        url: format!("https://x.com/{}/status/{}", username, id),
    })
    .collect()
}

fn curated_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: 1001,
            name: "OpenScienceDAO".into(),
            description: "A decentralized autonomous organization focused on funding open science research projects.".into(),
            category: Category::OpenAccessResearch,
            scores: ProjectScores::new(92, 88, 95, 90),
            url: "https://twitter.com/OpenScienceDAO".into(),
            last_updated: date(2023, 11, 15),
        },
        ProjectRecord {
            id: 1002,
            name: "BioGenesis".into(),
            description: "Decentralized platform for collaborative biological research and data sharing.".into(),
            category: Category::Biology,
            scores: ProjectScores::new(85, 93, 80, 87),
            url: "https://twitter.com/BioGenesis".into(),
            last_updated: date(2023, 11, 14),
        },
        ProjectRecord {
            id: 1003,
            name: "ClimateChain".into(),
            description: "Using blockchain to verify and share climate research data globally.".into(),
            category: Category::ClimateScience,
            scores: ProjectScores::new(90, 85, 82, 88),
            url: "https://twitter.com/ClimateChain".into(),
            last_updated: date(2023, 11, 12),
        },
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

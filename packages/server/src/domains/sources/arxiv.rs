//! Preprint provider: DeSci papers on arXiv.

use anyhow::Result;
use arxiv_client::{ArxivClient, Paper, SearchQuery, SortBy, SortOrder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;

use super::{collect_batches, log_points};
use crate::common::stable_id;
use crate::domains::enrichment::categorize_keywords;
use crate::domains::projects::models::{Category, ProjectRecord, ProjectScores};
use crate::domains::projects::ProjectProvider;
use crate::kernel::Clock;

pub const DESCI_SEARCH_TERMS: [&str; 5] = [
    "decentralized science",
    "blockchain research",
    "open science",
    "science dao",
    "decentralized research",
];

/// Subject classes searched by the default paper feed.
pub const DESCI_CATEGORIES: [&str; 10] = [
    "cs.DL",          // Digital Libraries
    "cs.CY",          // Computers and Society
    "q-bio",          // Quantitative Biology
    "q-fin",          // Quantitative Finance
    "physics.soc-ph", // Physics and Society
    "cs.CR",          // Cryptography and Security
    "cs.AI",          // Artificial Intelligence
    "cs.DB",          // Databases
    "cs.DC",          // Distributed Computing
    "cs.NE",          // Neural and Evolutionary Computing
];

const RESULTS_PER_TERM: u32 = 10;
const FEED_RESULTS: u32 = 20;

/// Newest DeSci papers: any of the subject classes AND any of the terms.
pub fn desci_feed_query() -> SearchQuery {
    SearchQuery::categories_and_terms(&DESCI_CATEGORIES, &DESCI_SEARCH_TERMS)
        .sort(SortBy::SubmittedDate, SortOrder::Descending)
        .max_results(FEED_RESULTS)
}

/// Free-text search across all fields, best matches first.
pub fn user_query(q: &str) -> SearchQuery {
    SearchQuery::all(q)
        .sort(SortBy::Relevance, SortOrder::Descending)
        .max_results(FEED_RESULTS)
}

pub struct ArxivProjectSource {
    client: ArxivClient,
    terms: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl ArxivProjectSource {
    pub fn new(client: ArxivClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            terms: DESCI_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
            clock,
        }
    }

    fn to_record(&self, paper: &Paper) -> ProjectRecord {
        ProjectRecord {
            id: stable_id("arxiv", paper.base_id()),
            name: paper.title.clone(),
            description: paper.summary.clone(),
            category: categorize_paper(paper),
            scores: score_paper(paper, self.clock.now()),
            url: paper.arxiv_url.clone(),
            last_updated: paper.updated_date.date_naive(),
        }
    }
}

#[async_trait]
impl ProjectProvider for ArxivProjectSource {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        let queries: Vec<SearchQuery> = self
            .terms
            .iter()
            .map(|term| SearchQuery::all(term).max_results(RESULTS_PER_TERM))
            .collect();
        let results = join_all(queries.iter().map(|q| self.client.search(q))).await;

        let papers = collect_batches(self.name(), results)?;

        // Versions of one paper collapse onto the newest fetched
        let unique: IndexMap<String, Paper> = papers
            .into_iter()
            .map(|paper| (paper.base_id().to_string(), paper))
            .collect();

        Ok(unique.values().map(|paper| self.to_record(paper)).collect())
    }
}

/// Category from the arXiv subject classes, primary first; keyword rules on
/// title and abstract when no class maps.
pub fn categorize_paper(paper: &Paper) -> Category {
    let classes = paper
        .primary_category
        .iter()
        .chain(paper.categories.iter());

    for class in classes {
        let category = if class.starts_with("q-bio") {
            Some(Category::Biology)
        } else if matches!(
            class.as_str(),
            "cs.AI" | "cs.LG" | "cs.NE" | "cs.CL" | "cs.CV" | "stat.ML"
        ) {
            Some(Category::Ai)
        } else if matches!(class.as_str(), "cond-mat.mtrl-sci" | "physics.chem-ph") {
            Some(Category::MaterialsScience)
        } else if matches!(class.as_str(), "physics.ao-ph" | "physics.geo-ph") {
            Some(Category::ClimateScience)
        } else {
            None
        };
        if let Some(category) = category {
            return category;
        }
    }

    categorize_keywords(&format!("{} {}", paper.title, paper.summary))
}

/// Preprints are open by default, hence high transparency. Collaboration
/// grows with the author count and engagement with recency of submission.
fn score_paper(paper: &Paper, now: DateTime<Utc>) -> ProjectScores {
    let transparency = 90.0;
    let collaboration = 60.0 + (paper.authors.len() as f64 * 8.0).min(40.0);
    let funding = 60.0 + log_points(paper.categories.len() as u64, 20.0).min(20.0);
    let engagement = match (now - paper.published_date).num_days() {
        d if d <= 30 => 95.0,
        d if d <= 180 => 85.0,
        d if d <= 365 => 75.0,
        _ => 65.0,
    };

    ProjectScores::from_f64(transparency, collaboration, funding, engagement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    use crate::kernel::test_dependencies::ManualClock;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn paper(id: &str, primary: Option<&str>, categories: &[&str]) -> Paper {
        Paper {
            id: format!("http://arxiv.org/abs/{}", id),
            title: "Decentralized Science Funding".into(),
            authors: vec!["A. Author".into(), "B. Author".into()],
            summary: "We study funding mechanisms for open research.".into(),
            published_date: now() - Duration::days(10),
            updated_date: Utc.with_ymd_and_hms(2025, 5, 25, 8, 0, 0).unwrap(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            primary_category: primary.map(String::from),
            pdf_url: format!("http://arxiv.org/pdf/{}", id),
            arxiv_url: format!("http://arxiv.org/abs/{}", id),
            doi: None,
        }
    }

    #[test]
    fn test_feed_query() {
        let query = desci_feed_query();
        assert!(query.search_query.starts_with("(cat:cs.DL OR cat:cs.CY"));
        assert!(query.search_query.contains("all:\"science dao\""));
        assert_eq!(query.max_results, 20);
        assert_eq!(query.sort, Some((SortBy::SubmittedDate, SortOrder::Descending)));

        let q = user_query("peer review");
        assert_eq!(q.sort, Some((SortBy::Relevance, SortOrder::Descending)));
        assert_eq!(q.max_results, 20);
    }

    #[test]
    fn test_categorize_by_subject_class() {
        assert_eq!(
            categorize_paper(&paper("1", Some("q-bio.GN"), &["q-bio.GN"])),
            Category::Biology
        );
        // first mapped class wins, primary first
        assert_eq!(
            categorize_paper(&paper("2", Some("cs.DL"), &["cs.DL", "cs.LG", "q-bio.QM"])),
            Category::Ai
        );
        assert_eq!(
            categorize_paper(&paper("3", None, &["physics.ao-ph"])),
            Category::ClimateScience
        );
    }

    #[test]
    fn test_categorize_falls_back_to_keywords() {
        let mut p = paper("4", Some("cs.CY"), &["cs.CY"]);
        p.title = "Blockchain registries".into();
        p.summary = "Ledgers for research provenance.".into();
        assert_eq!(categorize_paper(&p), Category::BlockchainForScience);
    }

    #[test]
    fn test_record_uses_version_free_id() {
        let source = ArxivProjectSource::new(ArxivClient::new(), Arc::new(ManualClock::at(now())));

        let v1 = source.to_record(&paper("2301.12345v1", Some("cs.DL"), &["cs.DL"]));
        let v2 = source.to_record(&paper("2301.12345v2", Some("cs.DL"), &["cs.DL"]));

        assert_eq!(v1.id, v2.id);
        assert_eq!(v1.id, stable_id("arxiv", "2301.12345"));
        assert_eq!(v1.url, "http://arxiv.org/abs/2301.12345v1");
        assert_eq!(v1.last_updated, NaiveDate::from_ymd_opt(2025, 5, 25).unwrap());
    }

    #[test]
    fn test_scores() {
        let scores = score_paper(&paper("5", None, &["cs.DL", "cs.CY"]), now());
        assert_eq!(scores.transparency(), 90);
        assert_eq!(scores.collaboration(), 76);
        assert_eq!(scores.engagement(), 95);
    }
}

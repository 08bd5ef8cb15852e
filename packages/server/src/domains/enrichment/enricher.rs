use anyhow::{Context, Result};
use std::sync::Arc;

use super::heuristics::{categorize_keywords, fallback_scores, summary_fallback};
use super::models::{Enrichment, NewProject};
use crate::domains::projects::models::{Category, ProjectScores};
use crate::kernel::BaseAI;

const CATEGORIZE_SYSTEM_PROMPT: &str = "You are a scientific research assistant. \
Categorize the following project into one of these categories: Biology, AI, Materials Science, \
Open Access Research, Climate Science, Blockchain for Science. Reply with the category name only.";

const SUMMARIZE_SYSTEM_PROMPT: &str = "You are a scientific research assistant. \
Summarize the following project description concisely.";

const SCORE_SYSTEM_PROMPT: &str = "You are a scientific research assistant evaluating \
decentralized science projects. Rate the project from 0 to 100 on transparency, collaboration, \
funding and engagement. Reply with a JSON object with exactly the integer fields \
\"transparency\", \"collaboration\", \"funding\" and \"engagement\" and nothing else.";

/// Derives category, scores and summaries for project descriptions.
///
/// Every operation succeeds: without a model, or when the model call fails,
/// the keyword heuristics answer instead.
#[derive(Clone, Default)]
pub struct ProjectEnricher {
    ai: Option<Arc<dyn BaseAI>>,
}

impl ProjectEnricher {
    pub fn new(ai: Option<Arc<dyn BaseAI>>) -> Self {
        Self { ai }
    }

    /// Heuristics only.
    pub fn heuristic() -> Self {
        Self { ai: None }
    }

    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn categorize(&self, description: &str) -> Category {
        let Some(ai) = &self.ai else {
            return categorize_keywords(description);
        };

        match ai.prompt(CATEGORIZE_SYSTEM_PROMPT, description).await {
            Ok(reply) => Category::coerce(&reply),
            Err(e) => {
                tracing::warn!(error = %e, "AI categorization failed, using keyword rules");
                categorize_keywords(description)
            }
        }
    }

    pub async fn score(&self, project: &NewProject) -> ProjectScores {
        let Some(ai) = &self.ai else {
            return fallback_scores();
        };

        match self.score_with_ai(ai.as_ref(), project).await {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "AI scoring failed, using fallback scores");
                fallback_scores()
            }
        }
    }

    async fn score_with_ai(&self, ai: &dyn BaseAI, project: &NewProject) -> Result<ProjectScores> {
        let mut input = String::new();
        if let Some(name) = project.name.as_deref().filter(|n| !n.trim().is_empty()) {
            input.push_str(&format!("Name: {}\n", name));
        }
        if let Some(url) = project.url.as_deref().filter(|u| !u.trim().is_empty()) {
            input.push_str(&format!("URL: {}\n", url));
        }
        input.push_str(&format!("Description: {}", project.description_text()));

        let reply = ai.prompt(SCORE_SYSTEM_PROMPT, &input).await?;
        parse_scores(&reply)
    }

    pub async fn summarize(&self, description: &str) -> String {
        let Some(ai) = &self.ai else {
            return summary_fallback(description);
        };

        match ai.prompt(SUMMARIZE_SYSTEM_PROMPT, description).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => summary_fallback(description),
            Err(e) => {
                tracing::warn!(error = %e, "AI summary failed, truncating description");
                summary_fallback(description)
            }
        }
    }

    /// Category and scores for a submitted project, computed concurrently.
    pub async fn enrich(&self, project: &NewProject) -> Enrichment {
        let (category, scores) = tokio::join!(
            self.categorize(project.description_text()),
            self.score(project)
        );
        Enrichment { category, scores }
    }
}

/// Read a scores object out of a model reply, tolerating surrounding prose
/// or a fenced code block.
fn parse_scores(reply: &str) -> Result<ProjectScores> {
    let start = reply.find('{').context("No JSON object in scoring reply")?;
    let end = reply.rfind('}').context("No JSON object in scoring reply")?;
    anyhow::ensure!(end > start, "Malformed JSON object in scoring reply");

    serde_json::from_str(&reply[start..=end]).context("Failed to parse scores from AI reply")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;

    #[tokio::test]
    async fn test_heuristic_enrichment() {
        let enricher = ProjectEnricher::heuristic();
        let enrichment = enricher
            .enrich(&NewProject::describe("Machine learning for drug discovery"))
            .await;

        assert_eq!(enrichment.category, Category::Ai);
        assert_eq!(enrichment.scores, ProjectScores::uniform(75));
    }

    #[tokio::test]
    async fn test_ai_category_is_coerced() {
        let ai = Arc::new(MockAI::new().with_response("Category: Climate Science."));
        let enricher = ProjectEnricher::new(Some(ai.clone()));

        assert_eq!(
            enricher.categorize("Sensor data for glaciers").await,
            Category::ClimateScience
        );
        assert!(ai.was_called_with("Sensor data for glaciers"));
    }

    #[tokio::test]
    async fn test_unrecognized_ai_category_defaults() {
        let ai = Arc::new(MockAI::new().with_response("Astrophysics"));
        let enricher = ProjectEnricher::new(Some(ai));

        assert_eq!(
            enricher.categorize("genetic sequencing").await,
            Category::OpenAccessResearch
        );
    }

    #[tokio::test]
    async fn test_ai_failure_falls_back_to_keywords() {
        let enricher = ProjectEnricher::new(Some(Arc::new(MockAI::failing())));

        assert_eq!(enricher.categorize("genetic sequencing").await, Category::Biology);
        assert_eq!(
            enricher.score(&NewProject::describe("anything")).await,
            ProjectScores::uniform(75)
        );
        assert_eq!(enricher.summarize("short one").await, "short one");
    }

    #[tokio::test]
    async fn test_ai_scores_are_clamped() {
        let ai = Arc::new(MockAI::new().with_response(
            "Here you go:\n```json\n{\"transparency\": 120, \"collaboration\": 88.6, \"funding\": -3, \"engagement\": 70}\n```",
        ));
        let enricher = ProjectEnricher::new(Some(ai));

        let scores = enricher.score(&NewProject::describe("x")).await;
        assert_eq!(scores, ProjectScores::new(100, 89, 0, 70));
    }

    #[tokio::test]
    async fn test_unparseable_scores_fall_back() {
        let ai = Arc::new(MockAI::new().with_response("pretty transparent overall"));
        let enricher = ProjectEnricher::new(Some(ai));

        assert_eq!(
            enricher.score(&NewProject::describe("x")).await,
            ProjectScores::uniform(75)
        );
    }

    #[tokio::test]
    async fn test_enrich_routes_prompts() {
        let ai = Arc::new(
            MockAI::new()
                .when_system_contains("Categorize", "Biology")
                .when_system_contains(
                    "Rate the project",
                    r#"{"transparency": 90, "collaboration": 80, "funding": 70, "engagement": 60}"#,
                ),
        );
        let enricher = ProjectEnricher::new(Some(ai.clone()));

        let enrichment = enricher
            .enrich(&NewProject {
                name: Some("GenomeDAO".into()),
                description: Some("Community-owned genome data".into()),
                url: Some("https://example.org/genome".into()),
            })
            .await;

        assert_eq!(enrichment.category, Category::Biology);
        assert_eq!(enrichment.scores, ProjectScores::new(90, 80, 70, 60));
        assert_eq!(ai.call_count(), 2);
        assert!(ai.was_called_with("Name: GenomeDAO"));
    }

    #[tokio::test]
    async fn test_summary_uses_ai_reply() {
        let ai = Arc::new(MockAI::new().with_response("  A concise summary.  "));
        let enricher = ProjectEnricher::new(Some(ai));

        assert_eq!(enricher.summarize("long text").await, "A concise summary.");
    }
}

//! Enrichment domain - category, scores and summary for a project description.
//!
//! Uses the language model when one is configured and falls back to keyword
//! heuristics otherwise (or when the model call fails).

pub mod enricher;
pub mod heuristics;
pub mod models;

pub use enricher::ProjectEnricher;
pub use heuristics::{
    categorize_keywords, contains_word, fallback_scores, summary_fallback, FALLBACK_SCORE,
};
pub use models::{Enrichment, NewProject};

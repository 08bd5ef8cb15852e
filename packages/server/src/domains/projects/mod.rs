//! Projects domain - aggregation, caching, filtering and sorting of DeSci
//! project records.
//!
//! Architecture:
//!   HTTP route → ProjectAggregator (cache hit, or fan-out to providers →
//!   merge by id → cache) → filter_by_category → sort_by_score

pub mod aggregator;
pub mod cache;
pub mod fallback;
pub mod filters;
pub mod models;
pub mod provider;
pub mod submissions;

// Re-export commonly used types
pub use aggregator::{merge_by_id, ProjectAggregator};
pub use cache::{CacheEntry, ProjectCache};
pub use fallback::fallback_projects;
pub use filters::{filter_by_category, sort_by_score};
pub use models::*;
pub use provider::ProjectProvider;
pub use submissions::SubmittedProjects;

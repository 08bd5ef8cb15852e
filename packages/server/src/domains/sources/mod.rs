//! Sources domain - provider adapters that turn external services into
//! project records.
//!
//! Each adapter owns its query parameters and implements
//! [`ProjectProvider`](crate::domains::projects::ProjectProvider).

pub mod arxiv;
pub mod github;
pub mod social;

pub use arxiv::{categorize_paper, desci_feed_query, user_query, ArxivProjectSource};
pub use github::{categorize_repository, score_repository, GitHubProjectSource};
pub use social::{SocialPost, SocialProjectSource};

use std::fmt::Display;

/// Flatten the outcome of several sub-queries issued for one fetch.
///
/// Partial failures are logged and skipped; the fetch as a whole only fails
/// when every sub-query failed.
pub(crate) fn collect_batches<T, E>(
    provider: &str,
    results: Vec<Result<Vec<T>, E>>,
) -> anyhow::Result<Vec<T>>
where
    E: Display,
{
    let total = results.len();
    let mut items = Vec::new();
    let mut first_error = None;
    let mut failed = 0;

    for result in results {
        match result {
            Ok(batch) => items.extend(batch),
            Err(e) => {
                tracing::debug!(provider, error = %e, "Sub-query failed");
                failed += 1;
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }

    if total > 0 && failed == total {
        anyhow::bail!(
            "all {} queries failed, first error: {}",
            total,
            first_error.unwrap_or_default()
        );
    }
    if failed > 0 {
        tracing::warn!(provider, failed, total, "Some sub-queries failed");
    }

    Ok(items)
}

/// Points on a logarithmic scale: `per_decade` for every factor of ten.
pub(crate) fn log_points(count: u64, per_decade: f64) -> f64 {
    ((count as f64) + 1.0).log10() * per_decade
}

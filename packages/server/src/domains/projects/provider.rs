//! Capability contract every project source implements.

use anyhow::Result;
use async_trait::async_trait;

use super::models::ProjectRecord;

/// A source of project records (code hosting, social feed, preprints, ledger).
///
/// Implementors write the fallible [`search`](ProjectProvider::search); the
/// aggregator only ever calls [`fetch_projects`](ProjectProvider::fetch_projects),
/// which cannot fail: a broken or slow source yields an empty list and never
/// aborts the aggregate. One attempt per call, no retries.
#[async_trait]
pub trait ProjectProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Query the source once and normalize its results.
    async fn search(&self) -> Result<Vec<ProjectRecord>>;

    /// [`search`](ProjectProvider::search), with failures logged and coerced to
    /// an empty list.
    async fn fetch_projects(&self) -> Vec<ProjectRecord> {
        match self.search().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    error = %format!("{:#}", e),
                    "Provider fetch failed, contributing no projects"
                );
                Vec::new()
            }
        }
    }
}

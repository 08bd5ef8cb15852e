//! Fan-out, merge, and cache of project records from every provider.

use futures::future::join_all;
use futures::FutureExt;
use indexmap::IndexMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::cache::ProjectCache;
use super::fallback::fallback_projects;
use super::models::ProjectRecord;
use super::provider::ProjectProvider;
use super::submissions::SubmittedProjects;
use crate::kernel::Clock;

/// Serves the merged project list, refreshing it from the providers once the
/// cache window has passed.
pub struct ProjectAggregator {
    providers: Vec<Arc<dyn ProjectProvider>>,
    submissions: Arc<SubmittedProjects>,
    cache: Arc<ProjectCache>,
    clock: Arc<dyn Clock>,
    /// At most one fan-out in flight; callers that miss the cache wait here
    /// and then reuse the result. Submissions take it too, so a record added
    /// mid-refresh is never overwritten by a list fetched before it existed.
    refresh: Mutex<()>,
}

impl ProjectAggregator {
    /// Submitted projects are registered first, then `providers` in the
    /// given order. Merge order follows registration.
    pub fn new(
        providers: Vec<Arc<dyn ProjectProvider>>,
        cache: Arc<ProjectCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let submissions = Arc::new(SubmittedProjects::new());
        let mut registered: Vec<Arc<dyn ProjectProvider>> = Vec::with_capacity(providers.len() + 1);
        registered.push(submissions.clone());
        registered.extend(providers);

        Self {
            providers: registered,
            submissions,
            cache,
            clock,
            refresh: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &Arc<ProjectCache> {
        &self.cache
    }

    pub fn submissions(&self) -> &Arc<SubmittedProjects> {
        &self.submissions
    }

    /// Record a submitted project and put it at the front of the cached
    /// list without refetching.
    ///
    /// Waits for any refresh in flight, so the refreshed list is stored
    /// before the record is prepended to it.
    pub async fn add_submission(&self, record: ProjectRecord) {
        let _guard = self.refresh.lock().await;
        self.submissions.add(record.clone());
        self.cache.prepend(record);
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// The merged list of every provider's projects.
    ///
    /// Never fails. When no provider returns anything, the previous list is
    /// served if there is one, otherwise the built-in fallback list; neither
    /// is stored as fresh, so the next call tries the providers again.
    pub async fn get_all_projects(&self) -> Arc<[ProjectRecord]> {
        if let Some(projects) = self.cache.get_valid(self.clock.now()) {
            tracing::debug!(count = projects.len(), "Serving projects from cache");
            return projects;
        }

        let _guard = self.refresh.lock().await;

        let now = self.clock.now();
        if let Some(projects) = self.cache.get_valid(now) {
            tracing::debug!(count = projects.len(), "Cache refreshed by a concurrent caller");
            return projects;
        }

        let merged = merge_by_id(self.fan_out().await);

        if merged.is_empty() {
            if let Some(stale) = self.cache.get() {
                tracing::warn!(
                    count = stale.projects.len(),
                    fetched_at = %stale.fetched_at,
                    "No provider returned projects, serving stale cache"
                );
                return stale.projects;
            }
            tracing::warn!("No provider returned projects and nothing cached, serving fallback list");
            return fallback_projects().into();
        }

        let projects: Arc<[ProjectRecord]> = merged.into();
        self.cache.set(projects.clone(), now);
        tracing::info!(
            count = projects.len(),
            providers = self.providers.len(),
            "Project cache refreshed"
        );

        projects
    }

    /// Query every provider concurrently. Results come back in registration
    /// order regardless of completion order.
    async fn fan_out(&self) -> Vec<Vec<ProjectRecord>> {
        let fetches = self.providers.iter().map(|provider| async move {
            let started = std::time::Instant::now();
            match AssertUnwindSafe(provider.fetch_projects())
                .catch_unwind()
                .await
            {
                Ok(records) => {
                    tracing::debug!(
                        provider = provider.name(),
                        count = records.len(),
                        duration_ms = started.elapsed().as_millis() as u64,
                        "Provider fetch complete"
                    );
                    records
                }
                Err(_) => {
                    tracing::error!(
                        provider = provider.name(),
                        "Provider panicked, contributing no projects"
                    );
                    Vec::new()
                }
            }
        });

        join_all(fetches).await
    }
}

/// Concatenate `batches` in order and collapse records sharing an id.
///
/// A later record replaces an earlier one's content but takes over its
/// position, i.e. the first occurrence of an id fixes where it appears and
/// the last occurrence decides what it contains.
pub fn merge_by_id<I>(batches: I) -> Vec<ProjectRecord>
where
    I: IntoIterator<Item = Vec<ProjectRecord>>,
{
    let mut by_id: IndexMap<i64, ProjectRecord> = IndexMap::new();
    for record in batches.into_iter().flatten() {
        by_id.insert(record.id, record);
    }
    by_id.into_values().collect()
}

//! Time-windowed cache of the merged project list.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, PoisonError, RwLock};

use super::models::ProjectRecord;

/// How long an aggregation result is served before the providers are queried again.
pub const DEFAULT_VALIDITY_WINDOW_SECS: i64 = 15 * 60;

/// A merged list together with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub projects: Arc<[ProjectRecord]>,
    pub fetched_at: DateTime<Utc>,
}

/// Process-wide cache entry, owned by the aggregator.
///
/// The list and its timestamp are swapped together under one lock, so a
/// reader never observes a list paired with another list's timestamp.
#[derive(Debug)]
pub struct ProjectCache {
    entry: RwLock<Option<CacheEntry>>,
    validity: Duration,
}

impl Default for ProjectCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_VALIDITY_WINDOW_SECS))
    }
}

impl ProjectCache {
    pub fn new(validity: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            validity,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// The current entry, fresh or stale.
    pub fn get(&self) -> Option<CacheEntry> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, projects: Arc<[ProjectRecord]>, fetched_at: DateTime<Utc>) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(CacheEntry {
            projects,
            fetched_at,
        });
    }

    /// An entry is valid when it holds at least one project and is younger
    /// than the validity window at `now`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.get_valid(now).is_some()
    }

    /// The cached list if it is valid at `now`.
    pub fn get_valid(&self, now: DateTime<Utc>) -> Option<Arc<[ProjectRecord]>> {
        let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|entry| !entry.projects.is_empty() && now - entry.fetched_at < self.validity)
            .map(|entry| entry.projects.clone())
    }

    /// Put `record` at the front of the live entry, replacing any record with
    /// the same id. The entry keeps its timestamp; without an entry this is a
    /// no-op.
    pub fn prepend(&self, record: ProjectRecord) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = guard.as_mut() {
            let projects: Vec<ProjectRecord> = std::iter::once(record.clone())
                .chain(entry.projects.iter().filter(|p| p.id != record.id).cloned())
                .collect();
            entry.projects = projects.into();
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.get().map(|entry| now - entry.fetched_at)
    }
}

//! Projects added through the API during this process's lifetime.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

use super::models::ProjectRecord;
use super::provider::ProjectProvider;

/// In-memory store of submitted projects, newest first.
///
/// The aggregator registers it as its first provider so submissions survive
/// cache refreshes.
#[derive(Debug, Default)]
pub struct SubmittedProjects {
    records: RwLock<Vec<ProjectRecord>>,
}

impl SubmittedProjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, record: ProjectRecord) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.retain(|r| r.id != record.id);
        records.insert(0, record);
    }

    /// Reported on the health route.
    pub fn count(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl ProjectProvider for SubmittedProjects {
    fn name(&self) -> &str {
        "submissions"
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

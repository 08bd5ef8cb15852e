//! Hetu protocol adapter.
//!
//! The protocol exposes no public API yet, so the registry is a curated list
//! and anchoring is kept in process memory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::sync::{Arc, PoisonError, RwLock};

use super::models::LedgerMetadata;
use crate::domains::projects::models::{Category, ProjectRecord, ProjectScores};
use crate::domains::projects::ProjectProvider;
use crate::kernel::Clock;

pub struct HetuLedger {
    anchored: RwLock<Vec<LedgerMetadata>>,
    clock: Arc<dyn Clock>,
}

impl HetuLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            anchored: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Anchor `record` and return its ledger metadata. Anchoring the same id
    /// again replaces the earlier entry.
    pub fn store_project(&self, record: &ProjectRecord) -> Result<LedgerMetadata> {
        let metadata = LedgerMetadata {
            project_id: record.id,
            scores: record.scores,
            timestamp: self.clock.now(),
            verification_hash: verification_hash(record)?,
        };

        let mut anchored = self.anchored.write().unwrap_or_else(PoisonError::into_inner);
        anchored.retain(|m| m.project_id != record.id);
        anchored.push(metadata.clone());

        tracing::info!(
            project_id = record.id,
            name = %record.name,
            hash = %metadata.verification_hash,
            "Project anchored on Hetu"
        );

        Ok(metadata)
    }

    /// Number of distinct projects anchored so far.
    pub fn anchored_count(&self) -> usize {
        self.anchored.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl ProjectProvider for HetuLedger {
    fn name(&self) -> &str {
        "hetu"
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        Ok(registry())
    }
}

/// Hex SHA-256 of the record's JSON encoding. Field order is fixed by the
/// struct, so equal records hash equally.
pub fn verification_hash(record: &ProjectRecord) -> Result<String> {
    let bytes = serde_json::to_vec(record).context("Failed to encode project for hashing")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn registry() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: 3001,
            name: "Hetu Science Commons".into(),
            description: "A decentralized platform for scientific data sharing and collaboration built on Hetu Protocol.".into(),
            category: Category::OpenAccessResearch,
            scores: ProjectScores::new(98, 95, 90, 92),
            url: "https://hetu.example.com/projects/science-commons".into(),
            last_updated: date(2023, 11, 10),
        },
        ProjectRecord {
            id: 3002,
            name: "BioHetu".into(),
            description: "Decentralized biological data repository with verifiable credentials and attribution.".into(),
            category: Category::Biology,
            scores: ProjectScores::new(95, 90, 85, 88),
            url: "https://hetu.example.com/projects/biohetu".into(),
            last_updated: date(2023, 11, 5),
        },
        ProjectRecord {
            id: 3003,
            name: "AI Research Collective".into(),
            description: "Collaborative AI research platform with decentralized compute resources and model sharing.".into(),
            category: Category::Ai,
            scores: ProjectScores::new(92, 96, 88, 94),
            url: "https://hetu.example.com/projects/ai-collective".into(),
            last_updated: date(2023, 11, 8),
        },
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

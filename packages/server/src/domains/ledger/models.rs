use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::projects::models::ProjectScores;

/// Proof that a project record was anchored on the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMetadata {
    pub project_id: i64,
    pub scores: ProjectScores,
    pub timestamp: DateTime<Utc>,
    /// Lowercase hex SHA-256 of the record's JSON encoding
    pub verification_hash: String,
}

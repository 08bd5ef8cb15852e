use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, ProjectScores};

/// A DeSci project as served to clients.
///
/// `id` is the only identity: two records with the same id from different
/// providers describe the same project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub scores: ProjectScores,
    pub url: String,
    /// Serialized as `YYYY-MM-DD`
    pub last_updated: NaiveDate,
}

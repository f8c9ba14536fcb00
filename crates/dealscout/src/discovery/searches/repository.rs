use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::buyers::domain::ProjectId;
use super::super::buyers::scoring::{ScoredBuyer, ScoringConfig};

/// Identifier wrapper for saved searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchId(pub String);

/// Parent metadata persisted ahead of the result snapshot. The snapshot is
/// a separate write so the manager can roll this record back when the
/// snapshot write fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchRecord {
    pub id: SearchId,
    pub project_id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub scoring_config: ScoringConfig,
}

impl SavedSearchRecord {
    pub fn into_search(self, results: Vec<ScoredBuyer>) -> SavedSearch {
        SavedSearch {
            id: self.id,
            project_id: self.project_id,
            name: self.name,
            created_at: self.created_at,
            scoring_config: self.scoring_config,
            results,
        }
    }
}

/// A named, immutable snapshot of a scored and filtered result set. A new
/// save always produces a new search; nothing patches an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: SearchId,
    pub project_id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub scoring_config: ScoringConfig,
    pub results: Vec<ScoredBuyer>,
}

/// Listing row for the saved-search sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchSummary {
    pub id: SearchId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the manager can be exercised against in-memory
/// doubles. `delete` reports `NotFound` for unknown ids; the manager
/// decides what that means at its own boundary.
pub trait SavedSearchRepository: Send + Sync {
    fn insert_search(&self, record: &SavedSearchRecord) -> Result<(), RepositoryError>;
    fn insert_results(&self, id: &SearchId, results: &[ScoredBuyer]) -> Result<(), RepositoryError>;
    fn list(&self, project_id: &ProjectId) -> Result<Vec<SavedSearchSummary>, RepositoryError>;
    fn fetch_results(&self, id: &SearchId) -> Result<Option<Vec<ScoredBuyer>>, RepositoryError>;
    fn delete(&self, id: &SearchId) -> Result<(), RepositoryError>;
}

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),
}

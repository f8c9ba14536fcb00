//! Saved searches: harden a ranked result set into a named, re-loadable
//! snapshot that survives later changes to the live buyer source.

mod repository;

pub use repository::{
    RepositoryError, SavedSearch, SavedSearchRecord, SavedSearchRepository, SavedSearchSummary,
    SearchId,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::buyers::domain::ProjectId;
use super::buyers::scoring::{ScoredBuyer, ScoringConfig};

/// Errors surfaced by the saved-search manager.
#[derive(Debug, thiserror::Error)]
pub enum SavedSearchError {
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
    /// The result snapshot failed to persist and the parent record could
    /// not be rolled back, so a search exists without its results.
    #[error("search '{name}' was saved without its result snapshot and could not be rolled back")]
    Degraded { id: SearchId, name: String },
}

static SEARCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_search_id() -> SearchId {
    let id = SEARCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SearchId(format!("search-{id:06}"))
}

/// Snapshots `(ScoringConfig, ranked results)` under a user-chosen name and
/// supports listing, reloading, and deleting the snapshots.
pub struct SavedSearchManager<R> {
    repository: Arc<R>,
}

impl<R> SavedSearchManager<R>
where
    R: SavedSearchRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persist the parent record, then the result snapshot. Atomic from the
    /// caller's view: when the snapshot write fails the parent record is
    /// deleted again, and only when that rollback also fails does the save
    /// surface as degraded instead of cleanly failed.
    pub fn save(
        &self,
        project_id: &ProjectId,
        name: &str,
        config: &ScoringConfig,
        results: &[ScoredBuyer],
    ) -> Result<SavedSearch, SavedSearchError> {
        let record = SavedSearchRecord {
            id: next_search_id(),
            project_id: project_id.clone(),
            name: name.to_string(),
            created_at: Utc::now(),
            scoring_config: config.clone(),
        };

        self.repository.insert_search(&record)?;

        if let Err(snapshot_failure) = self.repository.insert_results(&record.id, results) {
            return match self.repository.delete(&record.id) {
                Ok(()) | Err(RepositoryError::NotFound) => {
                    Err(SavedSearchError::Persistence(snapshot_failure))
                }
                Err(rollback_failure) => {
                    warn!(
                        search = %record.id.0,
                        error = %rollback_failure,
                        "failed to roll back partially saved search"
                    );
                    Err(SavedSearchError::Degraded {
                        id: record.id,
                        name: record.name,
                    })
                }
            };
        }

        Ok(record.into_search(results.to_vec()))
    }

    /// Summaries for a project, most recent first. Created-at ties break by
    /// id descending; ids are monotonic so the order stays deterministic.
    pub fn list(&self, project_id: &ProjectId) -> Result<Vec<SavedSearchSummary>, SavedSearchError> {
        let mut summaries = self.repository.list(project_id)?;
        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(summaries)
    }

    pub fn load_results(&self, id: &SearchId) -> Result<Vec<ScoredBuyer>, SavedSearchError> {
        self.repository
            .fetch_results(id)?
            .ok_or(SavedSearchError::Persistence(RepositoryError::NotFound))
    }

    /// Deleting an already-deleted search is not an error here: the
    /// underlying store's `NotFound` reads as "already gone".
    pub fn delete(&self, id: &SearchId) -> Result<(), SavedSearchError> {
        match self.repository.delete(id) {
            Ok(()) | Err(RepositoryError::NotFound) => Ok(()),
            Err(failure) => Err(SavedSearchError::Persistence(failure)),
        }
    }
}

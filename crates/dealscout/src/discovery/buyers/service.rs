use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::super::bookmarks::SavedBuyerSet;
use super::super::searches::{
    SavedSearch, SavedSearchError, SavedSearchManager, SavedSearchRepository, SavedSearchSummary,
    SearchId,
};
use super::directory::{BuyerDirectory, DirectoryError};
use super::domain::{BuyerId, BuyerKind, ProjectId};
use super::filters::{self, FilterState};
use super::query::BooleanQuery;
use super::scoring::{
    RationaleScoreProvider, ScoredBuyer, ScoringConfig, ScoringEngine, ValidationError,
};

/// One discovery pass over a project's candidate universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub kind: BuyerKind,
    #[serde(default)]
    pub scoring_config: ScoringConfig,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub query: BooleanQuery,
}

/// Facade composing the buyer directory, scoring engine, filter pipeline,
/// saved-search manager, and per-project bookmark sets. Constructed fresh
/// with explicit collaborators; it reads no ambient state.
pub struct BuyerDiscoveryService<D, R> {
    directory: Arc<D>,
    rationales: Arc<dyn RationaleScoreProvider>,
    searches: SavedSearchManager<R>,
    bookmarks: Mutex<HashMap<ProjectId, SavedBuyerSet>>,
}

impl<D, R> BuyerDiscoveryService<D, R>
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    pub fn new(
        directory: Arc<D>,
        repository: Arc<R>,
        rationales: Arc<dyn RationaleScoreProvider>,
    ) -> Self {
        Self {
            directory,
            rationales,
            searches: SavedSearchManager::new(repository),
            bookmarks: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch one kind of buyer, score every record against the request's
    /// weighting, then filter, query, and rank. The full result set is
    /// computed eagerly; pacing its disclosure is the caller's concern
    /// (see [`crate::discovery::reveal`]).
    pub fn discover(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Vec<ScoredBuyer>, DiscoveryServiceError> {
        request.scoring_config.validate()?;
        request.filters.validate()?;

        let buyers = self.directory.list(request.kind)?;
        let engine = ScoringEngine::new(request.scoring_config.clone(), self.rationales.clone());
        let scored = engine.score_all(&buyers);

        Ok(filters::apply(&scored, &request.filters, &request.query))
    }

    pub fn save_search(
        &self,
        project_id: &ProjectId,
        name: &str,
        config: &ScoringConfig,
        results: &[ScoredBuyer],
    ) -> Result<SavedSearch, DiscoveryServiceError> {
        config.validate()?;
        Ok(self.searches.save(project_id, name, config, results)?)
    }

    pub fn list_searches(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<SavedSearchSummary>, DiscoveryServiceError> {
        Ok(self.searches.list(project_id)?)
    }

    pub fn load_search_results(
        &self,
        id: &SearchId,
    ) -> Result<Vec<ScoredBuyer>, DiscoveryServiceError> {
        Ok(self.searches.load_results(id)?)
    }

    pub fn delete_search(&self, id: &SearchId) -> Result<(), DiscoveryServiceError> {
        Ok(self.searches.delete(id)?)
    }

    pub fn bookmark(&self, project_id: &ProjectId, buyer: BuyerId) {
        self.bookmarks
            .lock()
            .expect("bookmark mutex poisoned")
            .entry(project_id.clone())
            .or_default()
            .add(buyer);
    }

    pub fn unbookmark(&self, project_id: &ProjectId, buyer: &BuyerId) {
        if let Some(saved) = self
            .bookmarks
            .lock()
            .expect("bookmark mutex poisoned")
            .get_mut(project_id)
        {
            saved.remove(buyer);
        }
    }

    pub fn is_bookmarked(&self, project_id: &ProjectId, buyer: &BuyerId) -> bool {
        self.bookmarks
            .lock()
            .expect("bookmark mutex poisoned")
            .get(project_id)
            .map(|saved| saved.contains(buyer))
            .unwrap_or(false)
    }

    /// Bookmarked buyer ids for a project, in the order they were saved.
    pub fn bookmarks(&self, project_id: &ProjectId) -> Vec<BuyerId> {
        self.bookmarks
            .lock()
            .expect("bookmark mutex poisoned")
            .get(project_id)
            .map(|saved| saved.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Error raised by the discovery service facade.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    SavedSearch(#[from] SavedSearchError),
}

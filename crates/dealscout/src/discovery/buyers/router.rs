use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::discovery_status;

use super::super::searches::{SavedSearchRepository, SavedSearchSummary, SearchId};
use super::directory::BuyerDirectory;
use super::domain::{BuyerId, ProjectId};
use super::scoring::{ScoredBuyer, ScoringConfig};
use super::service::{BuyerDiscoveryService, DiscoveryRequest, DiscoveryServiceError};

/// Router builder exposing the discovery engine, saved searches, and
/// bookmarks over HTTP.
pub fn discovery_router<D, R>(service: Arc<BuyerDiscoveryService<D, R>>) -> Router
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects/:project_id/discovery",
            post(discover_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/searches",
            post(save_search_handler::<D, R>).get(list_searches_handler::<D, R>),
        )
        .route(
            "/api/v1/searches/:search_id/results",
            get(load_results_handler::<D, R>),
        )
        .route(
            "/api/v1/searches/:search_id",
            delete(delete_search_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/bookmarks",
            get(list_bookmarks_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/bookmarks/:buyer_id",
            put(add_bookmark_handler::<D, R>).delete(remove_bookmark_handler::<D, R>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct DiscoveryResponse {
    pub(crate) project_id: ProjectId,
    pub(crate) result_count: usize,
    pub(crate) results: Vec<ScoredBuyer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveSearchRequest {
    pub(crate) name: String,
    pub(crate) scoring_config: ScoringConfig,
    pub(crate) results: Vec<ScoredBuyer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveSearchResponse {
    pub(crate) id: SearchId,
    pub(crate) name: String,
    pub(crate) result_count: usize,
}

fn error_response(error: DiscoveryServiceError) -> Response {
    let status = discovery_status(&error);
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn discover_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(project_id): Path<String>,
    axum::Json(request): axum::Json<DiscoveryRequest>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    match service.discover(&request) {
        Ok(results) => {
            let payload = DiscoveryResponse {
                project_id: ProjectId(project_id),
                result_count: results.len(),
                results,
            };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_search_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(project_id): Path<String>,
    axum::Json(request): axum::Json<SaveSearchRequest>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    let project_id = ProjectId(project_id);
    match service.save_search(
        &project_id,
        &request.name,
        &request.scoring_config,
        &request.results,
    ) {
        Ok(saved) => {
            let payload = SaveSearchResponse {
                id: saved.id,
                name: saved.name,
                result_count: saved.results.len(),
            };
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_searches_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    match service.list_searches(&ProjectId(project_id)) {
        Ok(summaries) => {
            let payload: Vec<SavedSearchSummary> = summaries;
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn load_results_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(search_id): Path<String>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    match service.load_search_results(&SearchId(search_id)) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_search_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(search_id): Path<String>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    match service.delete_search(&SearchId(search_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_bookmark_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path((project_id, buyer_id)): Path<(String, String)>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    service.bookmark(&ProjectId(project_id), BuyerId(buyer_id));
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn remove_bookmark_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path((project_id, buyer_id)): Path<(String, String)>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    service.unbookmark(&ProjectId(project_id), &BuyerId(buyer_id));
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn list_bookmarks_handler<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    let saved = service.bookmarks(&ProjectId(project_id));
    (StatusCode::OK, axum::Json(saved)).into_response()
}

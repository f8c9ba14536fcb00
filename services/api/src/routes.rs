use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use dealscout::discovery::buyers::{
    discovery_router, BuyerDirectory, BuyerDiscoveryService, DiscoveryRequest,
};
use dealscout::discovery::export::ranked_results_csv;
use dealscout::discovery::searches::SavedSearchRepository;
use dealscout::error::AppError;

use crate::infra::AppState;

pub(crate) fn with_discovery_routes<D, R>(
    service: Arc<BuyerDiscoveryService<D, R>>,
) -> axum::Router
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    discovery_router(service.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/projects/:project_id/discovery/export",
            axum::routing::post(export_endpoint::<D, R>).with_state(service),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Run a discovery pass and stream the first 50 ranked rows as CSV.
pub(crate) async fn export_endpoint<D, R>(
    State(service): State<Arc<BuyerDiscoveryService<D, R>>>,
    Path(_project_id): Path<String>,
    Json(request): Json<DiscoveryRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: BuyerDirectory + 'static,
    R: SavedSearchRepository + 'static,
{
    let results = service.discover(&request).map_err(AppError::from)?;
    let csv = ranked_results_csv(&results)
        .map_err(|error| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, error)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        csv,
    ))
}

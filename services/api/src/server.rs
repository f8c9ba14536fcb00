use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use dealscout::config::AppConfig;
use dealscout::discovery::buyers::BuyerDiscoveryService;
use dealscout::error::AppError;
use dealscout::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{demo_directory, AppState, InMemorySavedSearchRepository};
use crate::routes::with_discovery_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (directory, rationales) = demo_directory();
    let repository = Arc::new(InMemorySavedSearchRepository::default());
    let discovery_service = Arc::new(BuyerDiscoveryService::new(
        Arc::new(directory),
        repository,
        Arc::new(rationales),
    ));

    let app = with_discovery_routes(discovery_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "buyer discovery service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::config::ConfigError;
use crate::discovery::buyers::service::DiscoveryServiceError;
use crate::discovery::searches::{RepositoryError, SavedSearchError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Discovery(DiscoveryServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Discovery(err) => write!(f, "discovery error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Discovery(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Discovery(err) => discovery_status(err),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub(crate) fn discovery_status(error: &DiscoveryServiceError) -> StatusCode {
    match error {
        DiscoveryServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DiscoveryServiceError::Directory(_) => StatusCode::BAD_GATEWAY,
        DiscoveryServiceError::SavedSearch(SavedSearchError::Persistence(
            RepositoryError::NotFound,
        )) => StatusCode::NOT_FOUND,
        DiscoveryServiceError::SavedSearch(SavedSearchError::Persistence(
            RepositoryError::Unavailable(_),
        )) => StatusCode::BAD_GATEWAY,
        DiscoveryServiceError::SavedSearch(SavedSearchError::Degraded { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<DiscoveryServiceError> for AppError {
    fn from(value: DiscoveryServiceError) -> Self {
        Self::Discovery(value)
    }
}

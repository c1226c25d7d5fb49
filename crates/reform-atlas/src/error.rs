use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::ingest::ReformImportError;
use crate::places::AtlasServiceError;
use crate::review::ReviewServiceError;
use crate::telemetry::TelemetryError;

/// Top-level error for the service binary: everything `run()` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("import error: {0}")]
    Import(#[from] ReformImportError),
    #[error("atlas error: {0}")]
    Atlas(#[from] AtlasServiceError),
    #[error("review error: {0}")]
    Review(#[from] ReviewServiceError),
}

impl From<crate::places::RepositoryError> for AppError {
    fn from(err: crate::places::RepositoryError) -> Self {
        AppError::Atlas(AtlasServiceError::from(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Atlas(AtlasServiceError::PlaceNotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

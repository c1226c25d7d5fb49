use crate::infra::{AppState, InMemoryPlaceRepository, InMemorySubmissionRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use reform_atlas::places::{atlas_router, AtlasService};
use reform_atlas::review::{review_router, ReviewService};

pub(crate) fn with_atlas_routes(
    atlas: Arc<AtlasService<InMemoryPlaceRepository>>,
    review: Arc<ReviewService<InMemorySubmissionRepository>>,
) -> axum::Router {
    atlas_router(atlas)
        .merge(review_router(review))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "reform-atlas-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    // The flag flips once the dataset is loaded and the listener is bound.
    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "loading dataset" })
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

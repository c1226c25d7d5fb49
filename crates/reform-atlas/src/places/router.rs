use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::Category;

use super::domain::{PlaceId, PlaceType, ReformFilter, ReformStatus};
use super::repository::PlaceRepository;
use super::service::{AtlasService, AtlasServiceError};

/// Router builder exposing the public browse and report-card endpoints.
pub fn atlas_router<R>(service: Arc<AtlasService<R>>) -> Router
where
    R: PlaceRepository + 'static,
{
    Router::new()
        .route("/api/v1/reforms", get(list_reforms_handler::<R>))
        .route(
            "/api/v1/places/:place_id/report",
            get(report_card_handler::<R>),
        )
        .route("/api/v1/map", get(map_handler::<R>))
        .with_state(service)
}

/// Raw query parameters for the listing; values are validated into a
/// [`ReformFilter`] so typos get a 400 instead of silently matching nothing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReformQuery {
    category: Option<String>,
    status: Option<String>,
    place_type: Option<String>,
    state: Option<String>,
}

impl ReformQuery {
    fn into_filter(self) -> Result<ReformFilter, String> {
        let category = match self.category.as_deref() {
            Some(raw) => Some(
                Category::parse(raw).ok_or_else(|| format!("unknown category '{raw}'"))?,
            ),
            None => None,
        };
        let status = match self.status.as_deref() {
            Some(raw) => Some(
                ReformStatus::parse(raw).ok_or_else(|| format!("unknown status '{raw}'"))?,
            ),
            None => None,
        };
        let place_type = match self.place_type.as_deref() {
            Some(raw) => Some(
                PlaceType::parse(raw).ok_or_else(|| format!("unknown place type '{raw}'"))?,
            ),
            None => None,
        };

        Ok(ReformFilter {
            category,
            status,
            place_type,
            state_code: self
                .state
                .map(|state| state.trim().to_ascii_uppercase())
                .filter(|state| !state.is_empty()),
        })
    }
}

pub(crate) async fn list_reforms_handler<R>(
    State(service): State<Arc<AtlasService<R>>>,
    Query(query): Query<ReformQuery>,
) -> Response
where
    R: PlaceRepository + 'static,
{
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.list_reforms(&filter) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn report_card_handler<R>(
    State(service): State<Arc<AtlasService<R>>>,
    Path(place_id): Path<String>,
) -> Response
where
    R: PlaceRepository + 'static,
{
    let id = PlaceId(place_id);
    match service.report_card(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AtlasServiceError::PlaceNotFound) => {
            let payload = json!({ "error": "place not found", "place_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn map_handler<R>(State(service): State<Arc<AtlasService<R>>>) -> Response
where
    R: PlaceRepository + 'static,
{
    match service.map_points() {
        Ok(points) => (StatusCode::OK, axum::Json(points)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: AtlasServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

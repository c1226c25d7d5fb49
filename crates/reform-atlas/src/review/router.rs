use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::places::repository::RepositoryError;

use super::domain::{BillSubmission, ReviewDecision, SubmissionId, SubmissionRecord};
use super::repository::SubmissionRepository;
use super::service::{ReviewService, ReviewServiceError};

const DEFAULT_PENDING_LIMIT: usize = 100;

/// Router builder for public submission intake and the admin queue.
pub fn review_router<R>(service: Arc<ReviewService<R>>) -> Router
where
    R: SubmissionRepository + 'static,
{
    Router::new()
        .route("/api/v1/submissions", post(submit_handler::<R>))
        .route("/api/v1/admin/submissions", get(pending_handler::<R>))
        .route(
            "/api/v1/admin/submissions/:short_id/decision",
            post(decision_handler::<R>),
        )
        .with_state(service)
}

/// Sanitized representation of a submission for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub short_id: SubmissionId,
    pub place_name: String,
    pub state_code: String,
    pub bill_name: String,
    pub bill_url: String,
    pub status: &'static str,
    pub submitted_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
}

impl SubmissionView {
    pub fn from_record(record: &SubmissionRecord) -> Self {
        Self {
            short_id: record.short_id.clone(),
            place_name: record.submission.place_name.clone(),
            state_code: record.submission.state_code.clone(),
            bill_name: record.submission.bill_name.clone(),
            bill_url: record.submission.bill_url.clone(),
            status: record.status.label(),
            submitted_on: record.submitted_on,
            decided_on: record.decided_on,
            review_note: record.review_note.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PendingQuery {
    limit: Option<usize>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ReviewService<R>>>,
    axum::Json(submission): axum::Json<BillSubmission>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    match service.submit(submission, Local::now().date_naive()) {
        Ok(record) => {
            let view = SubmissionView::from_record(&record);
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn pending_handler<R>(
    State(service): State<Arc<ReviewService<R>>>,
    Query(query): Query<PendingQuery>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_PENDING_LIMIT);
    match service.pending(limit) {
        Ok(records) => {
            let views: Vec<SubmissionView> =
                records.iter().map(SubmissionView::from_record).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<ReviewService<R>>>,
    Path(short_id): Path<String>,
    axum::Json(decision): axum::Json<ReviewDecision>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let id = SubmissionId(short_id.to_ascii_uppercase());
    match service.decide(&id, decision, Local::now().date_naive()) {
        Ok(record) => {
            let view = SubmissionView::from_record(&record);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ReviewServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "submission not found",
                "short_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(ReviewServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "submission already decided",
                "short_id": id.0,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn service_error(error: ReviewServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

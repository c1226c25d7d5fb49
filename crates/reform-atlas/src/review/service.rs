use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::places::repository::RepositoryError;

use super::domain::{
    BillSubmission, ReviewDecision, ReviewVerdict, SubmissionId, SubmissionRecord,
    SubmissionStatus,
};
use super::repository::SubmissionRepository;

/// Collision retries before a submission is rejected outright.
pub const SHORT_ID_ATTEMPTS: usize = 10;

const SHORT_ID_LEN: usize = 6;

/// Service in front of the review-queue repository.
pub struct ReviewService<R> {
    repository: Arc<R>,
}

impl<R: SubmissionRepository> ReviewService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores a new submission under a fresh short ID, regenerating the ID
    /// on collision up to [`SHORT_ID_ATTEMPTS`] times.
    pub fn submit(
        &self,
        submission: BillSubmission,
        submitted_on: NaiveDate,
    ) -> Result<SubmissionRecord, ReviewServiceError> {
        for _ in 0..SHORT_ID_ATTEMPTS {
            let record = SubmissionRecord {
                short_id: generate_short_id(),
                submission: submission.clone(),
                status: SubmissionStatus::Pending,
                submitted_on,
                decided_on: None,
                review_note: None,
            };

            match self.repository.insert(record) {
                Ok(stored) => {
                    info!(short_id = %stored.short_id.0, "bill submission queued");
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict) => continue,
                Err(other) => return Err(other.into()),
            }
        }
        Err(ReviewServiceError::ShortIdExhausted)
    }

    pub fn get(&self, id: &SubmissionId) -> Result<SubmissionRecord, ReviewServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, ReviewServiceError> {
        Ok(self.repository.pending(limit)?)
    }

    /// Applies an admin decision; the repository enforces atomicity and the
    /// pending-only rule.
    pub fn decide(
        &self,
        id: &SubmissionId,
        decision: ReviewDecision,
        decided_on: NaiveDate,
    ) -> Result<SubmissionRecord, ReviewServiceError> {
        let status = match decision.verdict {
            ReviewVerdict::Approve => SubmissionStatus::Approved,
            ReviewVerdict::Reject => SubmissionStatus::Rejected,
        };
        let record = self
            .repository
            .apply_decision(id, status, decision.note, decided_on)?;
        info!(short_id = %record.short_id.0, status = record.status.label(), "submission decided");
        Ok(record)
    }
}

fn generate_short_id() -> SubmissionId {
    let raw = Uuid::new_v4().simple().to_string();
    SubmissionId(raw[..SHORT_ID_LEN].to_ascii_uppercase())
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("could not allocate a unique short id after {SHORT_ID_ATTEMPTS} attempts")]
    ShortIdExhausted,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

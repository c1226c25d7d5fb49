use chrono::NaiveDate;

use crate::places::repository::RepositoryError;

use super::domain::{SubmissionId, SubmissionRecord, SubmissionStatus};

/// Storage abstraction for the review queue.
///
/// `apply_decision` must be atomic: implementations hold their write lock
/// (or run a transaction) across the pending-status check and the update,
/// so two admins deciding the same submission cannot both win. A decision
/// against a non-pending record fails with `Conflict`.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError>;
    fn apply_decision(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
        note: Option<String>,
        decided_on: NaiveDate,
    ) -> Result<SubmissionRecord, RepositoryError>;
}

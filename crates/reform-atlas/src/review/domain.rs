use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Short, shareable identifier for a submission, e.g. `7F3A2C`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// A crowd-submitted bill awaiting admin review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSubmission {
    pub place_name: String,
    pub state_code: String,
    pub bill_name: String,
    pub bill_url: String,
    pub notes: Option<String>,
}

/// Review lifecycle; only pending submissions accept a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

/// Stored submission with its review metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub short_id: SubmissionId,
    pub submission: BillSubmission,
    pub status: SubmissionStatus,
    pub submitted_on: NaiveDate,
    pub decided_on: Option<NaiveDate>,
    pub review_note: Option<String>,
}

/// Admin verdict on a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approve,
    Reject,
}

/// Decision payload carried by the admin endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub verdict: ReviewVerdict,
    #[serde(default)]
    pub note: Option<String>,
}

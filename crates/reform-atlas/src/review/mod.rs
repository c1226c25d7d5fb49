//! Admin review queue for crowd-submitted bills.
//!
//! Visitors submit a bill they believe reformed housing policy somewhere;
//! admins approve or reject each submission. The scraping and AI enrichment
//! that fill in bill details run as an external pipeline against approved
//! submissions and are not modeled here.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    BillSubmission, ReviewDecision, ReviewVerdict, SubmissionId, SubmissionRecord,
    SubmissionStatus,
};
pub use repository::SubmissionRepository;
pub use router::review_router;
pub use service::{ReviewService, ReviewServiceError, SHORT_ID_ATTEMPTS};

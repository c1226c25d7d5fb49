use serde::{Deserialize, Serialize};

use super::domain::{Place, PlaceId, Reform};

/// A place together with every reform on record for it. The service grades
/// these snapshots from scratch on each request; there is no cached score to
/// invalidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSnapshot {
    pub place: Place,
    pub reforms: Vec<Reform>,
}

/// Storage abstraction so services can be exercised against in-memory fakes
/// and the scorer never sees a database handle.
pub trait PlaceRepository: Send + Sync {
    fn place(&self, id: &PlaceId) -> Result<Option<Place>, RepositoryError>;
    fn snapshots(&self) -> Result<Vec<PlaceSnapshot>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

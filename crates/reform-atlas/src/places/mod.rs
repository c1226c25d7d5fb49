//! Places, their reforms, and the public browse/report-card surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Place, PlaceId, PlaceType, Reform, ReformFilter, ReformStatus};
pub use repository::{PlaceRepository, PlaceSnapshot, RepositoryError};
pub use router::atlas_router;
pub use service::{
    AtlasService, AtlasServiceError, MapPoint, PlaceReportCard, PlaceSummary, ReformListing,
};

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Category, ReformTypeCatalog};
use crate::grading::{
    peer_comparisons, suggest_missing_reforms, AdoptedReform, GradeEngine, GradeReport,
    LetterGrade, PeerAdoptions, PlaceStanding,
};

use super::domain::{Place, PlaceId, PlaceType, Reform, ReformFilter, ReformStatus};
use super::repository::{PlaceRepository, PlaceSnapshot, RepositoryError};

/// Read-side service behind the public browse and report-card endpoints.
///
/// Every request re-fetches rows and grades from scratch. Concurrent
/// requests for the same place duplicate work instead of sharing a cache;
/// that tradeoff is deliberate at current query volumes.
pub struct AtlasService<R> {
    repository: Arc<R>,
    engine: GradeEngine,
}

impl<R: PlaceRepository> AtlasService<R> {
    pub fn new(repository: Arc<R>, catalog: ReformTypeCatalog) -> Self {
        Self {
            repository,
            engine: GradeEngine::new(catalog),
        }
    }

    pub fn engine(&self) -> &GradeEngine {
        &self.engine
    }

    /// Full report card for one place: category grades, overall grade, peer
    /// percentiles, and missing-reform suggestions.
    pub fn report_card(&self, place_id: &PlaceId) -> Result<PlaceReportCard, AtlasServiceError> {
        let snapshots = self.repository.snapshots()?;
        let target = snapshots
            .iter()
            .find(|snapshot| &snapshot.place.id == place_id)
            .ok_or(AtlasServiceError::PlaceNotFound)?;

        let rows = self.adopted_rows(&target.reforms);
        let (category_grades, overall_grade) = self.engine.grade(&rows);

        let standings: Vec<PlaceStanding> = snapshots
            .iter()
            .map(|snapshot| self.standing(snapshot))
            .collect();
        let target_standing = PlaceStanding {
            overall_score: overall_grade.overall_score,
            ..self.standing(target)
        };
        let comparisons = peer_comparisons(&target_standing, &standings);

        let adopted_codes: BTreeSet<String> = rows
            .iter()
            .map(|row| row.reform_type_code.clone())
            .collect();
        let peer_sets: Vec<PeerAdoptions> = snapshots
            .iter()
            .map(|snapshot| self.peer_adoptions(snapshot))
            .collect();
        let todo_items = suggest_missing_reforms(
            &target_standing,
            &adopted_codes,
            &peer_sets,
            self.engine.catalog(),
        );

        debug!(place = %place_id.0, score = overall_grade.overall_score, "report card computed");

        Ok(PlaceReportCard {
            place: PlaceSummary::from_place(&target.place),
            report: GradeReport {
                category_grades,
                overall_grade,
                comparisons,
                todo_items,
            },
        })
    }

    /// Filtered reform listing for the public browser.
    pub fn list_reforms(
        &self,
        filter: &ReformFilter,
    ) -> Result<Vec<ReformListing>, AtlasServiceError> {
        let snapshots = self.repository.snapshots()?;
        let mut listings = Vec::new();

        for snapshot in &snapshots {
            if let Some(place_type) = filter.place_type {
                if snapshot.place.place_type != place_type {
                    continue;
                }
            }
            if let Some(state) = filter.state_code.as_deref() {
                if snapshot.place.state_code.as_deref() != Some(state) {
                    continue;
                }
            }

            for reform in &snapshot.reforms {
                if let Some(status) = filter.status {
                    if reform.status != status {
                        continue;
                    }
                }

                let categories = self.categories_of(reform);
                if let Some(category) = filter.category {
                    if !categories.contains(&category) {
                        continue;
                    }
                }

                listings.push(ReformListing {
                    place_id: snapshot.place.id.clone(),
                    place_name: snapshot.place.name.clone(),
                    place_type: snapshot.place.place_type,
                    state_code: snapshot.place.state_code.clone(),
                    reform_id: reform.id.clone(),
                    bill_name: reform.bill_name.clone(),
                    status: reform.status,
                    adopted_on: reform.adopted_on,
                    reform_type_codes: reform.reform_type_codes.clone(),
                    categories: categories.into_iter().collect(),
                });
            }
        }

        listings.sort_by(|a, b| {
            a.place_name
                .cmp(&b.place_name)
                .then_with(|| a.bill_name.cmp(&b.bill_name))
        });
        Ok(listings)
    }

    /// One graded point per place with known coordinates, for the map view.
    pub fn map_points(&self) -> Result<Vec<MapPoint>, AtlasServiceError> {
        let snapshots = self.repository.snapshots()?;
        let mut points = Vec::new();

        for snapshot in &snapshots {
            let (Some(latitude), Some(longitude)) =
                (snapshot.place.latitude, snapshot.place.longitude)
            else {
                continue;
            };

            let rows = self.adopted_rows(&snapshot.reforms);
            let (_, overall) = self.engine.grade(&rows);
            points.push(MapPoint {
                place_id: snapshot.place.id.clone(),
                name: snapshot.place.name.clone(),
                place_type: snapshot.place.place_type,
                latitude,
                longitude,
                overall_score: overall.overall_score,
                letter_grade: overall.overall_letter_grade,
            });
        }

        points.sort_by(|a, b| a.place_id.cmp(&b.place_id));
        Ok(points)
    }

    /// Joins a place's reforms against the catalog, one row per
    /// (reform x reform-type) pairing. Non-adopted reforms and unknown codes
    /// never reach the scorer.
    fn adopted_rows(&self, reforms: &[Reform]) -> Vec<AdoptedReform> {
        let mut rows = Vec::new();
        for reform in reforms {
            if reform.status != ReformStatus::Adopted {
                continue;
            }
            for code in &reform.reform_type_codes {
                match self.engine.catalog().get(code) {
                    Some(reform_type) => rows.push(AdoptedReform {
                        reform_type_code: code.clone(),
                        category: reform_type.category,
                        scope: reform.scope.clone(),
                        land_use: reform.land_use.clone(),
                        requirements: reform.requirements.clone(),
                    }),
                    None => {
                        debug!(reform = %reform.id, code = %code, "dropping unknown reform-type code");
                    }
                }
            }
        }
        rows
    }

    fn categories_of(&self, reform: &Reform) -> BTreeSet<Category> {
        reform
            .reform_type_codes
            .iter()
            .filter_map(|code| self.engine.catalog().get(code))
            .map(|reform_type| reform_type.category)
            .collect()
    }

    fn standing(&self, snapshot: &PlaceSnapshot) -> PlaceStanding {
        let rows = self.adopted_rows(&snapshot.reforms);
        PlaceStanding {
            place_id: snapshot.place.id.0.clone(),
            place_type: snapshot.place.place_type,
            state_code: snapshot.place.state_code.clone(),
            region: snapshot.place.region.clone(),
            population: snapshot.place.population,
            overall_score: self.engine.overall_score(&rows),
        }
    }

    fn peer_adoptions(&self, snapshot: &PlaceSnapshot) -> PeerAdoptions {
        let adopted_codes = self
            .adopted_rows(&snapshot.reforms)
            .into_iter()
            .map(|row| row.reform_type_code)
            .collect();
        PeerAdoptions {
            place_id: snapshot.place.id.0.clone(),
            place_type: snapshot.place.place_type,
            state_code: snapshot.place.state_code.clone(),
            region: snapshot.place.region.clone(),
            population: snapshot.place.population,
            adopted_codes,
        }
    }
}

/// Error raised by the atlas read service.
#[derive(Debug, thiserror::Error)]
pub enum AtlasServiceError {
    #[error("place not found")]
    PlaceNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Identity block rendered above the grades on a report card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    pub place_id: PlaceId,
    pub name: String,
    pub place_type: PlaceType,
    pub state_code: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
}

impl PlaceSummary {
    fn from_place(place: &Place) -> Self {
        Self {
            place_id: place.id.clone(),
            name: place.name.clone(),
            place_type: place.place_type,
            state_code: place.state_code.clone(),
            region: place.region.clone(),
            population: place.population,
        }
    }
}

/// Report-card response: place identity plus the grade report fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceReportCard {
    pub place: PlaceSummary,
    #[serde(flatten)]
    pub report: GradeReport,
}

/// One row of the public reform listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReformListing {
    pub place_id: PlaceId,
    pub place_name: String,
    pub place_type: PlaceType,
    pub state_code: Option<String>,
    pub reform_id: String,
    pub bill_name: String,
    pub status: ReformStatus,
    pub adopted_on: Option<chrono::NaiveDate>,
    pub reform_type_codes: Vec<String>,
    pub categories: Vec<Category>,
}

/// One graded marker for the map view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub place_id: PlaceId,
    pub name: String,
    pub place_type: PlaceType,
    pub latitude: f64,
    pub longitude: f64,
    pub overall_score: f64,
    pub letter_grade: LetterGrade,
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use reform_atlas::ingest::ImportedReform;
use reform_atlas::places::{
    Place, PlaceId, PlaceRepository, PlaceSnapshot, PlaceType, Reform, ReformStatus,
    RepositoryError,
};
use reform_atlas::review::{SubmissionId, SubmissionRecord, SubmissionRepository, SubmissionStatus};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Place store held entirely in memory. The dataset is loaded once at
/// startup (seed or CSV import) and served read-only after that.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPlaceRepository {
    snapshots: Arc<Vec<PlaceSnapshot>>,
}

impl InMemoryPlaceRepository {
    pub(crate) fn new(snapshots: Vec<PlaceSnapshot>) -> Self {
        Self {
            snapshots: Arc::new(snapshots),
        }
    }

    /// Groups importer output into one snapshot per place. The first row's
    /// place record wins when rows disagree about a place's attributes.
    pub(crate) fn from_imported(imported: Vec<ImportedReform>) -> Self {
        let mut grouped: BTreeMap<PlaceId, PlaceSnapshot> = BTreeMap::new();
        for row in imported {
            grouped
                .entry(row.place.id.clone())
                .or_insert_with(|| PlaceSnapshot {
                    place: row.place,
                    reforms: Vec::new(),
                })
                .reforms
                .push(row.reform);
        }
        Self::new(grouped.into_values().collect())
    }
}

impl PlaceRepository for InMemoryPlaceRepository {
    fn place(&self, id: &PlaceId) -> Result<Option<Place>, RepositoryError> {
        Ok(self
            .snapshots
            .iter()
            .find(|snapshot| &snapshot.place.id == id)
            .map(|snapshot| snapshot.place.clone()))
    }

    fn snapshots(&self) -> Result<Vec<PlaceSnapshot>, RepositoryError> {
        Ok(self.snapshots.as_ref().clone())
    }
}

/// Review queue backed by a mutex-guarded map. `apply_decision` holds the
/// lock across the pending check and the write, so concurrent decisions on
/// one submission serialize and the loser sees `Conflict`.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.short_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.short_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<SubmissionRecord> = guard
            .values()
            .filter(|record| record.status == SubmissionStatus::Pending)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.submitted_on
                .cmp(&b.submitted_on)
                .then_with(|| a.short_id.cmp(&b.short_id))
        });
        records.truncate(limit);
        Ok(records)
    }

    fn apply_decision(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
        note: Option<String>,
        decided_on: NaiveDate,
    ) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if record.status != SubmissionStatus::Pending {
            return Err(RepositoryError::Conflict);
        }
        record.status = status;
        record.review_note = note;
        record.decided_on = Some(decided_on);
        Ok(record.clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Built-in Texas demo dataset used when no CSV is supplied.
pub(crate) fn seed_snapshots() -> Vec<PlaceSnapshot> {
    use reform_atlas::catalog::{
        HOUSING_ADU, OTHER_LAND_VALUE_TAX, PARKING_ELIMINATED, PARKING_REDUCED, ZONING_RICZ,
        ZONING_TOD_UPZONE,
    };

    fn city(id: &str, name: &str, population: u64, latitude: f64, longitude: f64) -> Place {
        Place {
            id: PlaceId(id.to_string()),
            name: name.to_string(),
            place_type: PlaceType::City,
            state_code: Some("TX".to_string()),
            region: Some("South".to_string()),
            population: Some(population),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn reform(
        place_id: &str,
        n: u32,
        bill_name: &str,
        adopted_on: (i32, u32, u32),
        codes: &[&str],
        scope: &[&str],
        land_use: &[&str],
        requirements: &[&str],
    ) -> Reform {
        let to_strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        Reform {
            id: format!("{place_id}#{n}"),
            place_id: PlaceId(place_id.to_string()),
            status: ReformStatus::Adopted,
            adopted_on: NaiveDate::from_ymd_opt(adopted_on.0, adopted_on.1, adopted_on.2),
            bill_name: bill_name.to_string(),
            scope: to_strings(scope),
            land_use: to_strings(land_use),
            requirements: to_strings(requirements),
            reform_type_codes: to_strings(codes),
        }
    }

    vec![
        PlaceSnapshot {
            place: city("tx/austin", "Austin", 961_855, 30.2672, -97.7431),
            reforms: vec![
                reform(
                    "tx/austin",
                    1,
                    "Ordinance 20231102-014",
                    (2023, 11, 2),
                    &[PARKING_ELIMINATED],
                    &["citywide"],
                    &["all uses"],
                    &["by right"],
                ),
                reform(
                    "tx/austin",
                    2,
                    "HOME Phase 1",
                    (2023, 12, 7),
                    &[HOUSING_ADU],
                    &["citywide"],
                    &["residential"],
                    &["by right"],
                ),
            ],
        },
        PlaceSnapshot {
            place: city("tx/san-antonio", "San Antonio", 1_434_625, 29.4241, -98.4936),
            reforms: vec![reform(
                "tx/san-antonio",
                1,
                "SA Tomorrow Corridors",
                (2022, 6, 16),
                &[ZONING_TOD_UPZONE],
                &["citywide"],
                &[],
                &[],
            )],
        },
        PlaceSnapshot {
            place: city("tx/dallas", "Dallas", 1_304_379, 32.7767, -96.7970),
            reforms: vec![
                reform(
                    "tx/dallas",
                    1,
                    "Forward Dallas TOD Update",
                    (2024, 5, 22),
                    &[ZONING_TOD_UPZONE],
                    &[],
                    &[],
                    &[],
                ),
                reform(
                    "tx/dallas",
                    2,
                    "Parking Code Amendment",
                    (2024, 9, 11),
                    &[PARKING_REDUCED],
                    &["Transit Corridors"],
                    &["all uses"],
                    &["by right"],
                ),
            ],
        },
        PlaceSnapshot {
            place: city("tx/fort-worth", "Fort Worth", 956_709, 32.7555, -97.3308),
            reforms: vec![reform(
                "tx/fort-worth",
                1,
                "Near Southside Form-Based Code",
                (2023, 3, 28),
                &[ZONING_TOD_UPZONE],
                &[],
                &[],
                &[],
            )],
        },
        PlaceSnapshot {
            place: city("tx/el-paso", "El Paso", 678_815, 31.7619, -106.4850),
            reforms: vec![reform(
                "tx/el-paso",
                1,
                "Plan El Paso Transit Districts",
                (2021, 10, 5),
                &[ZONING_TOD_UPZONE, ZONING_RICZ],
                &[],
                &[],
                &[],
            )],
        },
        PlaceSnapshot {
            place: city("tx/houston", "Houston", 2_304_580, 29.7604, -95.3698),
            reforms: vec![reform(
                "tx/houston",
                1,
                "Market-Based Parking Expansion",
                (2019, 7, 24),
                &[PARKING_ELIMINATED],
                &["Downtown", "Midtown", "EaDo"],
                &["all uses"],
                &["by right"],
            )],
        },
        PlaceSnapshot {
            place: Place {
                id: PlaceId("tx".to_string()),
                name: "Texas".to_string(),
                place_type: PlaceType::State,
                state_code: Some("TX".to_string()),
                region: Some("South".to_string()),
                population: Some(29_145_505),
                latitude: None,
                longitude: None,
            },
            reforms: vec![reform(
                "tx",
                1,
                "HB 14",
                (2023, 6, 13),
                &[OTHER_LAND_VALUE_TAX],
                &[],
                &[],
                &[],
            )],
        },
    ]
}

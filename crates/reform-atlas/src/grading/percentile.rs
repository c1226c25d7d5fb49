//! Peer-comparison percentile ranking.
//!
//! A place's overall score is located within three pools: state peers (same
//! state and place type), region peers (same census region, place type, and
//! size bucket), and the national pool (same place type and size bucket).
//! Percentile is the fraction of the pool with a strictly lower score, so a
//! place tied with everyone sits at the 0th percentile and one strictly
//! above everyone lands at or near the 100th. A place missing a grouping
//! key is excluded from that ranking only; an empty pool ranks at 0.

use serde::Serialize;

use crate::places::domain::PlaceType;

/// Population row for ranking: one place with its recomputed overall score.
/// Only rows with known positive population participate in pools.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceStanding {
    pub place_id: String,
    pub place_type: PlaceType,
    pub state_code: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
    pub overall_score: f64,
}

/// Percentile standings (0-100) for the three peer pools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerComparisons {
    pub state_percentile: f64,
    pub region_percentile: f64,
    pub national_percentile: f64,
}

/// Population size class. Thresholds differ between municipal places and
/// states: city/county buckets break at 50k / 500k / 2M, state buckets at
/// 2M / 10M.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeBucket {
    Small,
    Mid,
    Large,
    VeryLarge,
}

pub(crate) fn size_bucket(place_type: PlaceType, population: u64) -> SizeBucket {
    match place_type {
        PlaceType::City | PlaceType::County => {
            if population < 50_000 {
                SizeBucket::Small
            } else if population < 500_000 {
                SizeBucket::Mid
            } else if population < 2_000_000 {
                SizeBucket::Large
            } else {
                SizeBucket::VeryLarge
            }
        }
        PlaceType::State => {
            if population < 2_000_000 {
                SizeBucket::Small
            } else if population < 10_000_000 {
                SizeBucket::Mid
            } else {
                SizeBucket::Large
            }
        }
    }
}

/// Ranks `target` against the supplied population.
pub fn peer_comparisons(target: &PlaceStanding, population: &[PlaceStanding]) -> PeerComparisons {
    let eligible = |place: &&PlaceStanding| {
        place.place_type == target.place_type
            && matches!(place.population, Some(population) if population > 0)
    };

    let state_percentile = match target.state_code.as_deref() {
        Some(state) => rank(
            target,
            population
                .iter()
                .filter(eligible)
                .filter(|place| place.state_code.as_deref() == Some(state)),
        ),
        None => 0.0,
    };

    let target_bucket = target
        .population
        .filter(|population| *population > 0)
        .map(|population| size_bucket(target.place_type, population));

    let region_percentile = match (target.region.as_deref(), target_bucket) {
        (Some(region), Some(bucket)) => rank(
            target,
            population
                .iter()
                .filter(eligible)
                .filter(|place| place.region.as_deref() == Some(region))
                .filter(|place| bucket_of(place) == Some(bucket)),
        ),
        _ => 0.0,
    };

    let national_percentile = match target_bucket {
        Some(bucket) => rank(
            target,
            population
                .iter()
                .filter(eligible)
                .filter(|place| bucket_of(place) == Some(bucket)),
        ),
        None => 0.0,
    };

    PeerComparisons {
        state_percentile,
        region_percentile,
        national_percentile,
    }
}

fn bucket_of(place: &PlaceStanding) -> Option<SizeBucket> {
    place
        .population
        .filter(|population| *population > 0)
        .map(|population| size_bucket(place.place_type, population))
}

fn rank<'a>(target: &PlaceStanding, pool: impl Iterator<Item = &'a PlaceStanding>) -> f64 {
    let mut total = 0usize;
    let mut lower = 0usize;
    for place in pool {
        total += 1;
        if place.overall_score < target.overall_score {
            lower += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    lower as f64 / total as f64 * 100.0
}

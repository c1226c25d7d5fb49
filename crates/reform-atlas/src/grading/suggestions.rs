//! Missing-reform ("priority area") suggestions.
//!
//! Looks at jurisdictions comparable to the target (same place type,
//! population within half-again either way, sharing its state or region)
//! and surfaces reform types that several of them adopted but the target
//! has not.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::ReformTypeCatalog;

use super::{PlaceStanding, TodoItem};
use crate::places::domain::PlaceType;

/// At most this many comparable places are consulted.
pub const PEER_CANDIDATE_CAP: usize = 50;
/// A reform type must be adopted by at least this many peers to surface.
pub const MIN_PEER_ADOPTIONS: usize = 3;
/// At most this many suggestions are returned.
pub const TODO_ITEM_CAP: usize = 10;

/// Adopted reform-type codes for one potential peer jurisdiction.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerAdoptions {
    pub place_id: String,
    pub place_type: PlaceType,
    pub state_code: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
    pub adopted_codes: BTreeSet<String>,
}

/// Suggests reform types common among the target's peers, ordered by
/// adoption count (descending), then category, then name.
pub fn suggest_missing_reforms(
    target: &PlaceStanding,
    adopted_codes: &BTreeSet<String>,
    peers: &[PeerAdoptions],
    catalog: &ReformTypeCatalog,
) -> Vec<TodoItem> {
    let Some(population) = target.population.filter(|population| *population > 0) else {
        return Vec::new();
    };
    let low = population - population / 2;
    let high = population + population / 2;

    let mut candidates: Vec<&PeerAdoptions> = peers
        .iter()
        .filter(|peer| peer.place_id != target.place_id)
        .filter(|peer| peer.place_type == target.place_type)
        .filter(|peer| matches!(peer.population, Some(pop) if pop >= low && pop <= high))
        .filter(|peer| shares_geography(target, peer))
        .collect();
    candidates.sort_by(|a, b| a.place_id.cmp(&b.place_id));
    candidates.truncate(PEER_CANDIDATE_CAP);

    let mut adoption_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for peer in &candidates {
        for code in &peer.adopted_codes {
            if !adopted_codes.contains(code) {
                *adoption_counts.entry(code.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut items: Vec<TodoItem> = adoption_counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_PEER_ADOPTIONS)
        .filter_map(|(code, count)| {
            catalog.get(code).map(|reform_type| TodoItem {
                reform_code: reform_type.code.clone(),
                reform_name: reform_type.name.clone(),
                category: reform_type.category,
                adoption_count: count,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.adoption_count
            .cmp(&a.adoption_count)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.reform_name.cmp(&b.reform_name))
    });
    items.truncate(TODO_ITEM_CAP);
    items
}

/// Peers qualify by sharing the target's state or its region; either
/// suffices.
fn shares_geography(target: &PlaceStanding, peer: &PeerAdoptions) -> bool {
    let same_state = match (target.state_code.as_deref(), peer.state_code.as_deref()) {
        (Some(target_state), Some(peer_state)) => target_state == peer_state,
        _ => false,
    };
    let same_region = match (target.region.as_deref(), peer.region.as_deref()) {
        (Some(target_region), Some(peer_region)) => target_region == peer_region,
        _ => false,
    };
    same_state || same_region
}

use super::common::*;
use crate::grading::peer_comparisons;
use crate::places::domain::PlaceType;

#[test]
fn missing_state_code_yields_zero_for_that_ranking_only() {
    let target = standing("tx/austin", PlaceType::City, None, Some("South"), Some(120_000), 40.0);
    let population = vec![
        target.clone(),
        standing("tx/waco", PlaceType::City, Some("TX"), Some("South"), Some(140_000), 10.0),
        standing("ga/macon", PlaceType::City, Some("GA"), Some("South"), Some(150_000), 20.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    assert_eq!(comparisons.state_percentile, 0.0);
    assert!(comparisons.region_percentile > 0.0);
    assert!(comparisons.national_percentile > 0.0);
}

#[test]
fn tied_scores_rank_at_the_bottom() {
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), Some(120_000), 25.0);
    let population = vec![
        target.clone(),
        standing("tx/waco", PlaceType::City, Some("TX"), Some("South"), Some(140_000), 25.0),
        standing("tx/plano", PlaceType::City, Some("TX"), Some("South"), Some(290_000), 25.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    assert_eq!(comparisons.state_percentile, 0.0);
    assert_eq!(comparisons.region_percentile, 0.0);
    assert_eq!(comparisons.national_percentile, 0.0);
}

#[test]
fn a_strict_leader_ranks_near_the_top() {
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), Some(120_000), 80.0);
    let population = vec![
        target.clone(),
        standing("tx/waco", PlaceType::City, Some("TX"), Some("South"), Some(140_000), 10.0),
        standing("tx/plano", PlaceType::City, Some("TX"), Some("South"), Some(290_000), 20.0),
        standing("tx/frisco", PlaceType::City, Some("TX"), Some("South"), Some(210_000), 30.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    // 3 of the 4 pool members (target included) score strictly lower.
    assert_eq!(comparisons.state_percentile, 75.0);
    assert_eq!(comparisons.national_percentile, 75.0);
}

#[test]
fn pools_never_mix_place_types() {
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), Some(120_000), 50.0);
    let population = vec![
        target.clone(),
        standing("tx", PlaceType::State, Some("TX"), Some("South"), Some(30_000_000), 10.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    // The state record never lands in a city pool.
    assert_eq!(comparisons.state_percentile, 0.0);
}

#[test]
fn city_size_buckets_split_at_fifty_thousand() {
    let target = standing("tx/waco", PlaceType::City, Some("TX"), Some("South"), Some(50_000), 60.0);
    let population = vec![
        target.clone(),
        // Just under the boundary: a different bucket, so not a national peer.
        standing("tx/temple", PlaceType::City, Some("TX"), Some("South"), Some(49_999), 10.0),
        standing("tx/plano", PlaceType::City, Some("TX"), Some("South"), Some(290_000), 10.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    // National pool is target + plano only.
    assert_eq!(comparisons.national_percentile, 50.0);
    // The state pool ignores size buckets entirely.
    assert_close(comparisons.state_percentile, 200.0 / 3.0);
}

#[test]
fn city_buckets_also_split_at_five_hundred_thousand_and_two_million() {
    // Large bucket target: peers at 499,999 and 2,000,000 fall outside it.
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), Some(961_855), 60.0);
    let population = vec![
        target.clone(),
        standing("tx/arlington", PlaceType::City, Some("TX"), Some("South"), Some(499_999), 10.0),
        standing("tx/dallas", PlaceType::City, Some("TX"), Some("South"), Some(1_999_999), 10.0),
        standing("tx/houston", PlaceType::City, Some("TX"), Some("South"), Some(2_000_000), 10.0),
    ];
    let comparisons = peer_comparisons(&target, &population);
    // National pool is target + dallas only.
    assert_eq!(comparisons.national_percentile, 50.0);

    // A city at 2M lands in the top bucket with other 2M+ cities.
    let target = standing("tx/houston", PlaceType::City, Some("TX"), Some("South"), Some(2_304_580), 60.0);
    let population = vec![
        target.clone(),
        standing("il/chicago", PlaceType::City, Some("IL"), Some("Midwest"), Some(2_000_000), 10.0),
        standing("tx/dallas", PlaceType::City, Some("TX"), Some("South"), Some(1_999_999), 10.0),
    ];
    let comparisons = peer_comparisons(&target, &population);
    assert_eq!(comparisons.national_percentile, 50.0);
}

#[test]
fn state_records_use_their_own_thresholds() {
    let target = standing("ia", PlaceType::State, Some("IA"), Some("Midwest"), Some(3_200_000), 70.0);
    let population = vec![
        target.clone(),
        standing("mo", PlaceType::State, Some("MO"), Some("Midwest"), Some(6_100_000), 20.0),
        // Above 10M: a Large state, outside the target's Mid bucket.
        standing("oh", PlaceType::State, Some("OH"), Some("Midwest"), Some(11_700_000), 20.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    assert_eq!(comparisons.region_percentile, 50.0);
}

#[test]
fn unknown_population_excludes_bucketed_rankings_only() {
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), None, 50.0);
    let population = vec![
        standing("tx/waco", PlaceType::City, Some("TX"), Some("South"), Some(140_000), 10.0),
        standing("tx/plano", PlaceType::City, Some("TX"), Some("South"), Some(290_000), 10.0),
    ];

    let comparisons = peer_comparisons(&target, &population);

    assert_eq!(comparisons.state_percentile, 100.0);
    assert_eq!(comparisons.region_percentile, 0.0);
    assert_eq!(comparisons.national_percentile, 0.0);
}

#[test]
fn empty_pools_rank_at_zero() {
    let target = standing("tx/austin", PlaceType::City, Some("TX"), Some("South"), Some(120_000), 90.0);

    let comparisons = peer_comparisons(&target, &[]);

    assert_eq!(comparisons.state_percentile, 0.0);
    assert_eq!(comparisons.region_percentile, 0.0);
    assert_eq!(comparisons.national_percentile, 0.0);
}

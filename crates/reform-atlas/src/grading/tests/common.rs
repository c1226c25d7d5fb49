use std::collections::BTreeSet;

use crate::catalog::{Category, ReformType, ReformTypeCatalog};
use crate::grading::{
    AdoptedReform, CategoryGrade, GradeEngine, PeerAdoptions, PlaceStanding,
};
use crate::places::domain::PlaceType;

pub(super) fn engine() -> GradeEngine {
    GradeEngine::new(ReformTypeCatalog::standard())
}

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// An adoption with no known limitations.
pub(super) fn adopted(code: &str, category: Category) -> AdoptedReform {
    limited(code, category, &[], &[], &[])
}

pub(super) fn limited(
    code: &str,
    category: Category,
    scope: &[&str],
    land_use: &[&str],
    requirements: &[&str],
) -> AdoptedReform {
    AdoptedReform {
        reform_type_code: code.to_string(),
        category,
        scope: strings(scope),
        land_use: strings(land_use),
        requirements: strings(requirements),
    }
}

/// A minimal catalog built from (code, category, name) triples.
pub(super) fn catalog_of(entries: &[(&str, Category, &str)]) -> ReformTypeCatalog {
    let types = entries
        .iter()
        .enumerate()
        .map(|(index, (code, category, name))| ReformType {
            id: index as u32 + 1,
            code: (*code).to_string(),
            category: *category,
            name: (*name).to_string(),
        })
        .collect();
    ReformTypeCatalog::new(types)
}

pub(super) fn standing(
    place_id: &str,
    place_type: PlaceType,
    state_code: Option<&str>,
    region: Option<&str>,
    population: Option<u64>,
    overall_score: f64,
) -> PlaceStanding {
    PlaceStanding {
        place_id: place_id.to_string(),
        place_type,
        state_code: state_code.map(str::to_string),
        region: region.map(str::to_string),
        population,
        overall_score,
    }
}

pub(super) fn peer(
    place_id: &str,
    place_type: PlaceType,
    state_code: Option<&str>,
    region: Option<&str>,
    population: Option<u64>,
    adopted: &[&str],
) -> PeerAdoptions {
    PeerAdoptions {
        place_id: place_id.to_string(),
        place_type,
        state_code: state_code.map(str::to_string),
        region: region.map(str::to_string),
        population,
        adopted_codes: adopted
            .iter()
            .map(|code| (*code).to_string())
            .collect::<BTreeSet<String>>(),
    }
}

pub(super) fn grade_for(grades: &[CategoryGrade], category: Category) -> &CategoryGrade {
    grades
        .iter()
        .find(|grade| grade.category == category)
        .unwrap_or_else(|| panic!("no grade computed for {category:?}"))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

//! Category score calculation.
//!
//! Most categories score as the ratio of distinct adopted reform types to
//! the catalog size for that category. Four categories replace the ratio
//! with their own formula; the strategy for each category is an explicit
//! variant here rather than string dispatch, so the special-cased set is
//! closed and testable. The limitation penalty applies uniformly after the
//! base score, overridden or not.

use std::collections::BTreeMap;

use crate::catalog::{
    self, Category, ReformTypeCatalog, HOUSING_ADU, HOUSING_PLEX, OTHER_LAND_VALUE_TAX,
    ZONING_RICZ, ZONING_TOD_UPZONE, ZONING_YIGBY,
};

use super::limitations::{limitation_penalty, PENALTY_CAP};
use super::{AdoptedReform, CategoryGrade, LetterGrade};

const ADU_POINTS: f64 = 100.0 / 3.0;
const PLEX_POINTS: f64 = 200.0 / 3.0;
const RICZ_POINTS: f64 = 45.0;
const YIGBY_POINTS: f64 = 10.0;
const TOD_UPZONE_POINTS: f64 = 45.0;

/// How a category converts its adopted reform types into a base score.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ScoreStrategy {
    /// Distinct adopted types over catalog size, as a percentage.
    Ratio,
    /// Full credit for eliminating parking minimums, half credit for a
    /// reduction, generic ratio otherwise.
    ParkingTiers,
    /// Fixed point values per reform-type code, summed and capped at 100.
    ComponentPoints(&'static [(&'static str, f64)]),
    /// Full credit when the named code is adopted, generic ratio otherwise.
    FullCreditFor(&'static str),
}

pub(crate) fn strategy(category: Category) -> ScoreStrategy {
    match category {
        Category::Parking => ScoreStrategy::ParkingTiers,
        Category::HousingTypology => ScoreStrategy::ComponentPoints(&[
            (HOUSING_ADU, ADU_POINTS),
            (HOUSING_PLEX, PLEX_POINTS),
        ]),
        Category::ZoningCategory => ScoreStrategy::ComponentPoints(&[
            (ZONING_RICZ, RICZ_POINTS),
            (ZONING_YIGBY, YIGBY_POINTS),
            (ZONING_TOD_UPZONE, TOD_UPZONE_POINTS),
        ]),
        Category::Other => ScoreStrategy::FullCreditFor(OTHER_LAND_VALUE_TAX),
        Category::PhysicalDimension | Category::Process | Category::BuildingCode => {
            ScoreStrategy::Ratio
        }
    }
}

/// Grades one category from the place's rows in that category.
pub(crate) fn score_category(
    category: Category,
    reforms: &[&AdoptedReform],
    catalog: &ReformTypeCatalog,
) -> CategoryGrade {
    let total_possible = catalog.count_in(category);
    if total_possible == 0 {
        return CategoryGrade {
            category,
            reforms_adopted_count: 0,
            total_possible_reforms: 0,
            limitations_penalty: 0,
            base_score: 0.0,
            final_score: 0.0,
            letter_grade: LetterGrade::F,
        };
    }

    // Worst observed penalty per adopted type. Repeat adoptions of one type
    // never stack; the type carries the maximum penalty among them.
    let mut worst_by_type: BTreeMap<&str, u32> = BTreeMap::new();
    for reform in reforms {
        let points = limitation_penalty(&reform.scope, &reform.land_use, &reform.requirements);
        let entry = worst_by_type
            .entry(reform.reform_type_code.as_str())
            .or_insert(0);
        *entry = (*entry).max(points);
    }

    let adopted_count = worst_by_type.len();
    let penalty = worst_by_type.values().sum::<u32>().min(PENALTY_CAP);
    let ratio_score = adopted_count as f64 / total_possible as f64 * 100.0;
    let base_score = apply_strategy(strategy(category), &worst_by_type, ratio_score);
    let final_score = (base_score - f64::from(penalty)).clamp(0.0, 100.0);

    CategoryGrade {
        category,
        reforms_adopted_count: adopted_count,
        total_possible_reforms: total_possible,
        limitations_penalty: penalty,
        base_score,
        final_score,
        letter_grade: LetterGrade::from_score(final_score),
    }
}

fn apply_strategy(
    strategy: ScoreStrategy,
    adopted: &BTreeMap<&str, u32>,
    ratio_score: f64,
) -> f64 {
    match strategy {
        ScoreStrategy::Ratio => ratio_score,
        ScoreStrategy::ParkingTiers => {
            if adopted.contains_key(catalog::PARKING_ELIMINATED) {
                100.0
            } else if adopted.contains_key(catalog::PARKING_REDUCED)
                || adopted.contains_key(catalog::PARKING_REDUCED_MINIMUM)
            {
                50.0
            } else {
                ratio_score
            }
        }
        ScoreStrategy::ComponentPoints(points) => points
            .iter()
            .filter(|(code, _)| adopted.contains_key(*code))
            .map(|(_, value)| *value)
            .sum::<f64>()
            .min(100.0),
        ScoreStrategy::FullCreditFor(code) => {
            if adopted.contains_key(code) {
                100.0
            } else {
                ratio_score
            }
        }
    }
}

use super::common::*;
use crate::catalog::{
    Category, HOUSING_ADU, HOUSING_PLEX, OTHER_LAND_VALUE_TAX, PARKING_ELIMINATED,
    PARKING_REDUCED, ZONING_RICZ, ZONING_TOD_UPZONE, ZONING_YIGBY,
};
use crate::grading::{GradeEngine, LetterGrade};

#[test]
fn letter_grade_boundaries_are_inclusive_at_the_lower_edge() {
    assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
    assert_eq!(LetterGrade::from_score(89.999), LetterGrade::B);
    assert_eq!(LetterGrade::from_score(80.0), LetterGrade::B);
    assert_eq!(LetterGrade::from_score(70.0), LetterGrade::C);
    assert_eq!(LetterGrade::from_score(60.0), LetterGrade::D);
    assert_eq!(LetterGrade::from_score(59.999), LetterGrade::F);
}

#[test]
fn empty_category_catalog_grades_f_without_dividing() {
    // Catalog with no Housing Typology entries at all.
    let engine = GradeEngine::new(catalog_of(&[(
        PARKING_ELIMINATED,
        Category::Parking,
        "Parking Minimums Eliminated",
    )]));

    let (grades, _) = engine.grade(&[]);
    let housing = grade_for(&grades, Category::HousingTypology);

    assert_eq!(housing.total_possible_reforms, 0);
    assert_eq!(housing.final_score, 0.0);
    assert_eq!(housing.letter_grade, LetterGrade::F);
}

#[test]
fn repeat_adoptions_of_one_type_count_once() {
    let engine = engine();
    let rows = vec![
        adopted(HOUSING_ADU, Category::HousingTypology),
        adopted(HOUSING_ADU, Category::HousingTypology),
    ];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    assert_eq!(housing.reforms_adopted_count, 1);
}

#[test]
fn adding_a_clean_reform_never_lowers_the_base_score() {
    let engine = engine();

    let one = vec![adopted("process:by_right_approval", Category::Process)];
    let two = vec![
        adopted("process:by_right_approval", Category::Process),
        adopted("process:permit_shot_clock", Category::Process),
    ];

    let (grades_one, _) = engine.grade(&one);
    let (grades_two, _) = engine.grade(&two);

    let before = grade_for(&grades_one, Category::Process).base_score;
    let after = grade_for(&grades_two, Category::Process).base_score;
    assert!(after >= before, "base score dropped from {before} to {after}");
}

#[test]
fn parking_elimination_earns_full_credit_regardless_of_catalog_size() {
    let engine = engine();
    let rows = vec![adopted(PARKING_ELIMINATED, Category::Parking)];

    let (grades, _) = engine.grade(&rows);
    let parking = grade_for(&grades, Category::Parking);

    assert_eq!(parking.final_score, 100.0);
    assert_eq!(parking.letter_grade, LetterGrade::A);
}

#[test]
fn parking_reduction_alone_earns_half_credit() {
    let engine = engine();
    let rows = vec![adopted(PARKING_REDUCED, Category::Parking)];

    let (grades, _) = engine.grade(&rows);
    let parking = grade_for(&grades, Category::Parking);

    assert_eq!(parking.base_score, 50.0);
    assert_eq!(parking.final_score, 50.0);
}

#[test]
fn parking_without_tier_reforms_falls_back_to_the_ratio() {
    let engine = engine();
    let rows = vec![adopted("parking:maximums", Category::Parking)];

    let (grades, _) = engine.grade(&rows);
    let parking = grade_for(&grades, Category::Parking);

    // 1 of 4 seeded parking types.
    assert_close(parking.base_score, 25.0);
}

#[test]
fn housing_typology_components_are_additive() {
    let engine = engine();

    let adu_only = vec![adopted(HOUSING_ADU, Category::HousingTypology)];
    let plex_only = vec![adopted(HOUSING_PLEX, Category::HousingTypology)];
    let both = vec![
        adopted(HOUSING_ADU, Category::HousingTypology),
        adopted(HOUSING_PLEX, Category::HousingTypology),
    ];

    let (grades, _) = engine.grade(&adu_only);
    assert_close(grade_for(&grades, Category::HousingTypology).final_score, 33.33);

    let (grades, _) = engine.grade(&plex_only);
    assert_close(grade_for(&grades, Category::HousingTypology).final_score, 66.67);

    let (grades, _) = engine.grade(&both);
    assert_close(grade_for(&grades, Category::HousingTypology).final_score, 100.0);
}

#[test]
fn other_housing_types_add_nothing_to_the_typology_components() {
    let engine = engine();
    let rows = vec![adopted("housing:multifamily", Category::HousingTypology)];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    assert_eq!(housing.base_score, 0.0);
    assert_eq!(housing.reforms_adopted_count, 1);
}

#[test]
fn zoning_components_sum_and_cap_at_one_hundred() {
    let engine = engine();

    let pair = vec![
        adopted(ZONING_RICZ, Category::ZoningCategory),
        adopted(ZONING_YIGBY, Category::ZoningCategory),
    ];
    let (grades, _) = engine.grade(&pair);
    assert_close(grade_for(&grades, Category::ZoningCategory).base_score, 55.0);

    let all = vec![
        adopted(ZONING_RICZ, Category::ZoningCategory),
        adopted(ZONING_YIGBY, Category::ZoningCategory),
        adopted(ZONING_TOD_UPZONE, Category::ZoningCategory),
    ];
    let (grades, _) = engine.grade(&all);
    assert_close(grade_for(&grades, Category::ZoningCategory).base_score, 100.0);
}

#[test]
fn land_value_tax_earns_full_credit_in_other() {
    let engine = engine();
    let rows = vec![adopted(OTHER_LAND_VALUE_TAX, Category::Other)];

    let (grades, _) = engine.grade(&rows);
    assert_eq!(grade_for(&grades, Category::Other).base_score, 100.0);
}

#[test]
fn other_without_land_value_tax_falls_back_to_the_ratio() {
    let engine = engine();
    let rows = vec![adopted("other:impact_fee_reform", Category::Other)];

    let (grades, _) = engine.grade(&rows);
    // 1 of 2 seeded "Other" types.
    assert_close(grade_for(&grades, Category::Other).base_score, 50.0);
}

#[test]
fn worst_penalty_per_type_wins_over_summing() {
    let engine = engine();
    let rows = vec![
        limited(HOUSING_ADU, Category::HousingTypology, &["Downtown District"], &[], &[]),
        limited(
            HOUSING_ADU,
            Category::HousingTypology,
            &["Downtown District"],
            &[],
            &["conditional use permit"],
        ),
    ];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    // max(5, 15), never 5 + 15.
    assert_eq!(housing.limitations_penalty, 15);
}

#[test]
fn category_penalty_caps_at_thirty_across_types() {
    let engine = engine();
    let fully_limited = |code: &str| {
        limited(
            code,
            Category::HousingTypology,
            &["Downtown District"],
            &["commercial corridors"],
            &["planning board approval"],
        )
    };
    let rows = vec![
        fully_limited(HOUSING_ADU),
        fully_limited(HOUSING_PLEX),
        fully_limited("housing:multifamily"),
    ];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    assert_eq!(housing.limitations_penalty, 30);
}

#[test]
fn penalty_applies_after_the_override_and_scores_stay_in_bounds() {
    let engine = engine();
    let rows = vec![limited(
        HOUSING_ADU,
        Category::HousingTypology,
        &["Downtown District"],
        &["commercial corridors"],
        &["planning board approval"],
    )];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    // 33.33 - 30 = 3.33; still clamped to 0..=100.
    assert_close(housing.final_score, 3.33);

    for grade in &grades {
        assert!(grade.final_score >= 0.0 && grade.final_score <= 100.0);
    }
}

#[test]
fn heavy_penalties_clamp_at_zero() {
    let engine = engine();
    let rows = vec![limited(
        "housing:multifamily",
        Category::HousingTypology,
        &["Downtown District"],
        &["commercial corridors"],
        &["planning board approval"],
    )];

    let (grades, _) = engine.grade(&rows);
    let housing = grade_for(&grades, Category::HousingTypology);

    // Component base score is 0 for non-ADU/plex types; 0 - 30 clamps to 0.
    assert_eq!(housing.final_score, 0.0);
}

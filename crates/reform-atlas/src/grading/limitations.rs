//! Per-reform limitation penalty.
//!
//! A reform narrowed to a named district, a subset of land uses, or a
//! discretionary approval path is worth less than its unrestricted
//! counterpart. Empty attribute lists mean "no known limitation" and
//! contribute nothing.

const SCOPE_POINTS: u32 = 5;
const LAND_USE_POINTS: u32 = 5;
const REQUIREMENTS_POINTS: u32 = 10;

/// Ceiling for a single reform and for a whole category.
pub(crate) const PENALTY_CAP: u32 = 30;

/// Markers that exempt a dimension from its penalty, matched
/// case-insensitively.
const UNRESTRICTED_SCOPE: &str = "citywide";
const UNRESTRICTED_LAND_USE: &str = "all uses";
const UNRESTRICTED_REQUIREMENTS: &str = "by right";

/// Penalty points (0..=30) for one reform's limitation attributes.
pub fn limitation_penalty(scope: &[String], land_use: &[String], requirements: &[String]) -> u32 {
    let scope_limited = is_limited(scope, UNRESTRICTED_SCOPE);
    let land_use_limited = is_limited(land_use, UNRESTRICTED_LAND_USE);
    let requirements_limited = is_limited(requirements, UNRESTRICTED_REQUIREMENTS);

    // A reform narrowed in every dimension is graded at the full cap.
    if scope_limited && land_use_limited && requirements_limited {
        return PENALTY_CAP;
    }

    let mut points = 0;
    if scope_limited {
        points += SCOPE_POINTS;
    }
    if land_use_limited {
        points += LAND_USE_POINTS;
    }
    if requirements_limited {
        points += REQUIREMENTS_POINTS;
    }
    points.min(PENALTY_CAP)
}

fn is_limited(values: &[String], unrestricted: &str) -> bool {
    !values.is_empty()
        && !values
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(unrestricted))
}

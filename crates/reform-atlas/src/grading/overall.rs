//! Overall grade aggregation.

use super::{CategoryGrade, LetterGrade, OverallGrade};

/// Unweighted mean of final scores across every category with at least one
/// catalog entry. Categories the place never touched still count at zero;
/// untouched policy domains drag the average down rather than vanish.
pub(crate) fn overall_grade(category_grades: &[CategoryGrade]) -> OverallGrade {
    let graded: Vec<&CategoryGrade> = category_grades
        .iter()
        .filter(|grade| grade.total_possible_reforms > 0)
        .collect();

    let categories_with_reforms = category_grades
        .iter()
        .filter(|grade| grade.reforms_adopted_count > 0)
        .count();

    if graded.is_empty() {
        return OverallGrade {
            overall_score: 0.0,
            overall_letter_grade: LetterGrade::F,
            categories_with_reforms: 0,
        };
    }

    let overall_score =
        graded.iter().map(|grade| grade.final_score).sum::<f64>() / graded.len() as f64;

    OverallGrade {
        overall_score,
        overall_letter_grade: LetterGrade::from_score(overall_score),
        categories_with_reforms,
    }
}

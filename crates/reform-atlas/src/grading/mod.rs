//! The grading engine.
//!
//! A place's adopted reforms are converted into per-category scores and
//! letter grades, an overall grade, percentile standings against peer
//! jurisdictions, and suggested "priority area" reforms its peers have
//! adopted. Everything here is pure computation over pre-fetched rows: no
//! I/O, no caching, no shared state. Callers are responsible for handing in
//! well-formed rows (unknown reform-type codes are dropped at the
//! repository join, before this module runs).

mod category;
mod limitations;
mod overall;
mod percentile;
mod suggestions;

#[cfg(test)]
mod tests;

pub use limitations::limitation_penalty;
pub use percentile::{peer_comparisons, PeerComparisons, PlaceStanding};
pub use suggestions::{
    suggest_missing_reforms, PeerAdoptions, MIN_PEER_ADOPTIONS, PEER_CANDIDATE_CAP, TODO_ITEM_CAP,
};

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, ReformTypeCatalog};

/// One (reform x reform-type) pairing at a place, already joined against the
/// catalog. The scorer's only per-place input.
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptedReform {
    pub reform_type_code: String,
    pub category: Category,
    pub scope: Vec<String>,
    pub land_use: Vec<String>,
    pub requirements: Vec<String>,
}

/// A-F mapping of a 0-100 score. Boundaries are inclusive at the lower edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            LetterGrade::A
        } else if score >= 80.0 {
            LetterGrade::B
        } else if score >= 70.0 {
            LetterGrade::C
        } else if score >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

/// Derived per-category grade. Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGrade {
    pub category: Category,
    pub reforms_adopted_count: usize,
    pub total_possible_reforms: usize,
    pub limitations_penalty: u32,
    pub base_score: f64,
    pub final_score: f64,
    pub letter_grade: LetterGrade,
}

/// Unweighted roll-up of the category grades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallGrade {
    pub overall_score: f64,
    pub overall_letter_grade: LetterGrade,
    pub categories_with_reforms: usize,
}

/// A reform type common among peers but absent at the target place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub reform_code: String,
    pub reform_name: String,
    pub category: Category,
    pub adoption_count: usize,
}

/// Everything the presentation layer needs to render a report card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub category_grades: Vec<CategoryGrade>,
    pub overall_grade: OverallGrade,
    pub comparisons: PeerComparisons,
    pub todo_items: Vec<TodoItem>,
}

/// Per-place grade computation against a fixed catalog.
#[derive(Debug, Clone)]
pub struct GradeEngine {
    catalog: ReformTypeCatalog,
}

impl GradeEngine {
    pub fn new(catalog: ReformTypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ReformTypeCatalog {
        &self.catalog
    }

    /// Grades one place's adopted-reform rows across every category.
    pub fn grade(&self, reforms: &[AdoptedReform]) -> (Vec<CategoryGrade>, OverallGrade) {
        let category_grades: Vec<CategoryGrade> = Category::ALL
            .into_iter()
            .map(|category| {
                let rows: Vec<&AdoptedReform> = reforms
                    .iter()
                    .filter(|reform| reform.category == category)
                    .collect();
                category::score_category(category, &rows, &self.catalog)
            })
            .collect();

        let overall = overall::overall_grade(&category_grades);
        (category_grades, overall)
    }

    /// Convenience for peer ranking: the overall score alone.
    pub fn overall_score(&self, reforms: &[AdoptedReform]) -> f64 {
        let (_, overall) = self.grade(reforms);
        overall.overall_score
    }
}

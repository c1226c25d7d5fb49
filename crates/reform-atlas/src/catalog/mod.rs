//! Reform-type reference data.
//!
//! Categories and reform types are seeded reference data: runtime logic reads
//! them but never mutates them. Each reform type carries a stable string code
//! (for example `parking:eliminated`) that reform rows and the grading engine
//! key on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reform types that trigger category-specific scoring rules.
pub const PARKING_ELIMINATED: &str = "parking:eliminated";
pub const PARKING_REDUCED: &str = "parking:reduced";
pub const PARKING_REDUCED_MINIMUM: &str = "parking:reduced_minimum";
pub const HOUSING_ADU: &str = "housing:adu";
pub const HOUSING_PLEX: &str = "housing:plex";
pub const ZONING_RICZ: &str = "zoning:ricz";
pub const ZONING_YIGBY: &str = "zoning:yigby";
pub const ZONING_TOD_UPZONE: &str = "zoning:tod_upzone";
pub const OTHER_LAND_VALUE_TAX: &str = "other:land_value_tax";

/// Top-level policy domain grouping reform types.
///
/// Declaration order doubles as the display sort order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Parking,
    #[serde(rename = "Housing Typology")]
    HousingTypology,
    #[serde(rename = "Zoning Category")]
    ZoningCategory,
    #[serde(rename = "Physical Dimension")]
    PhysicalDimension,
    Process,
    #[serde(rename = "Building Code")]
    BuildingCode,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Parking,
        Category::HousingTypology,
        Category::ZoningCategory,
        Category::PhysicalDimension,
        Category::Process,
        Category::BuildingCode,
        Category::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Parking => "Parking",
            Category::HousingTypology => "Housing Typology",
            Category::ZoningCategory => "Zoning Category",
            Category::PhysicalDimension => "Physical Dimension",
            Category::Process => "Process",
            Category::BuildingCode => "Building Code",
            Category::Other => "Other",
        }
    }

    /// Chip color used by the frontend when rendering category badges.
    pub const fn chip_color(self) -> &'static str {
        match self {
            Category::Parking => "#2f6fba",
            Category::HousingTypology => "#c2571f",
            Category::ZoningCategory => "#3f8f4f",
            Category::PhysicalDimension => "#8451a1",
            Category::Process => "#b03a48",
            Category::BuildingCode => "#7a6a2f",
            Category::Other => "#5d6770",
        }
    }

    /// Parses a query-parameter spelling such as `parking` or
    /// `housing_typology`. Spaces, hyphens, and case are normalized.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|ch| match ch {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "parking" => Some(Category::Parking),
            "housing_typology" => Some(Category::HousingTypology),
            "zoning_category" => Some(Category::ZoningCategory),
            "physical_dimension" => Some(Category::PhysicalDimension),
            "process" => Some(Category::Process),
            "building_code" => Some(Category::BuildingCode),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// A catalogued policy intervention, e.g. "Parking Minimums Eliminated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformType {
    pub id: u32,
    pub code: String,
    pub category: Category,
    pub name: String,
}

/// The full set of definable reform types, independent of any place.
#[derive(Debug, Clone)]
pub struct ReformTypeCatalog {
    types: Vec<ReformType>,
    by_code: BTreeMap<String, usize>,
}

impl ReformTypeCatalog {
    pub fn new(types: Vec<ReformType>) -> Self {
        let by_code = types
            .iter()
            .enumerate()
            .map(|(index, reform_type)| (reform_type.code.clone(), index))
            .collect();
        Self { types, by_code }
    }

    /// The standard seeded catalog shipped with the atlas.
    pub fn standard() -> Self {
        let entries: [(&str, Category, &str); 22] = [
            (PARKING_ELIMINATED, Category::Parking, "Parking Minimums Eliminated"),
            (PARKING_REDUCED, Category::Parking, "Parking Minimums Reduced"),
            (PARKING_REDUCED_MINIMUM, Category::Parking, "Parking Minimum Ratio Lowered"),
            ("parking:maximums", Category::Parking, "Parking Maximums Established"),
            (HOUSING_ADU, Category::HousingTypology, "Accessory Dwelling Units Legalized"),
            (HOUSING_PLEX, Category::HousingTypology, "Plex Housing Legalized"),
            ("housing:multifamily", Category::HousingTypology, "Multifamily Permitted in More Zones"),
            ("housing:sro", Category::HousingTypology, "Single Room Occupancy Legalized"),
            (ZONING_RICZ, Category::ZoningCategory, "Residential in Commercial Zones"),
            (ZONING_YIGBY, Category::ZoningCategory, "Faith-Based Land Development"),
            (ZONING_TOD_UPZONE, Category::ZoningCategory, "Transit-Oriented Upzoning"),
            ("zoning:office_conversion", Category::ZoningCategory, "Office-to-Residential Conversion"),
            ("dimension:height_increase", Category::PhysicalDimension, "Height Limits Raised"),
            ("dimension:lot_size_reduction", Category::PhysicalDimension, "Minimum Lot Sizes Reduced"),
            ("dimension:setback_reduction", Category::PhysicalDimension, "Setback Requirements Reduced"),
            ("dimension:far_increase", Category::PhysicalDimension, "Floor Area Ratio Increased"),
            ("process:by_right_approval", Category::Process, "By-Right Approval Expanded"),
            ("process:permit_shot_clock", Category::Process, "Permit Review Shot Clock"),
            ("building:single_stair", Category::BuildingCode, "Single-Stair Buildings Permitted"),
            ("building:code_update", Category::BuildingCode, "Building Code Modernized"),
            (OTHER_LAND_VALUE_TAX, Category::Other, "Land Value Tax Adopted"),
            ("other:impact_fee_reform", Category::Other, "Impact Fees Reformed"),
        ];

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

        Self::new(types)
    }

    pub fn get(&self, code: &str) -> Option<&ReformType> {
        self.by_code.get(code).map(|index| &self.types[*index])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn types_in(&self, category: Category) -> impl Iterator<Item = &ReformType> {
        self.types
            .iter()
            .filter(move |reform_type| reform_type.category == category)
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.types_in(category).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReformType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

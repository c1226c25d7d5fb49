use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Identifier wrapper for jurisdictions, e.g. `tx/austin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceId(pub String);

/// Kind of jurisdiction a place represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    City,
    County,
    State,
}

impl PlaceType {
    pub const fn label(self) -> &'static str {
        match self {
            PlaceType::City => "city",
            PlaceType::County => "county",
            PlaceType::State => "state",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "city" => Some(PlaceType::City),
            "county" => Some(PlaceType::County),
            "state" => Some(PlaceType::State),
            _ => None,
        }
    }
}

/// A jurisdiction tracked by the atlas.
///
/// Population and region come from upstream census lookups and may be absent
/// for some records; grading treats them as unknown rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub place_type: PlaceType,
    pub state_code: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Lifecycle of a policy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReformStatus {
    Adopted,
    Proposed,
    Failed,
}

impl ReformStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReformStatus::Adopted => "adopted",
            ReformStatus::Proposed => "proposed",
            ReformStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "adopted" => Some(ReformStatus::Adopted),
            "proposed" => Some(ReformStatus::Proposed),
            "failed" => Some(ReformStatus::Failed),
            _ => None,
        }
    }
}

/// A policy action taken (or attempted) by a place.
///
/// One legislative action may reform several policy domains at once, so a
/// reform carries one-or-more reform-type codes. An absent adoption date is a
/// deliberately preserved "date unknown" state, not a data error. Empty
/// limitation lists mean no known limitation in that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reform {
    pub id: String,
    pub place_id: PlaceId,
    pub status: ReformStatus,
    pub adopted_on: Option<NaiveDate>,
    pub bill_name: String,
    pub scope: Vec<String>,
    pub land_use: Vec<String>,
    pub requirements: Vec<String>,
    pub reform_type_codes: Vec<String>,
}

/// Filters for the public reform listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReformFilter {
    pub category: Option<Category>,
    pub status: Option<ReformStatus>,
    pub place_type: Option<PlaceType>,
    pub state_code: Option<String>,
}

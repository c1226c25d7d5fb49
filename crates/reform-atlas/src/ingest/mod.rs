//! Bulk CSV reform importer.
//!
//! The upstream ingestion scripts emit one row per reform with the place's
//! identity inline, semicolon-separated reform-type codes, and
//! pipe-separated limitation lists. Unknown codes are dropped per row and
//! reported so operators can fix the source data; a row with no recognized
//! code at all is skipped. An empty adoption date stays `None`, since "date
//! unknown" is a valid state rather than an error.

use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::catalog::ReformTypeCatalog;
use crate::places::domain::{Place, PlaceId, PlaceType, Reform, ReformStatus};

/// A reform row joined with its place, as produced by the importer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedReform {
    pub place: Place,
    pub reform: Reform,
}

/// Outcome of one import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<ImportedReform>,
    pub skipped_rows: usize,
    pub unknown_codes: Vec<String>,
}

/// Error raised while reading a reform CSV.
#[derive(Debug, thiserror::Error)]
pub enum ReformImportError {
    #[error("failed to read reform csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

pub fn import_reforms<R: Read>(
    reader: R,
    catalog: &ReformTypeCatalog,
) -> Result<ImportReport, ReformImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut report = ImportReport::default();

    for (index, record) in csv_reader.deserialize::<ReformRow>().enumerate() {
        let row_number = index + 2; // 1-based, after the header
        let row = record?;

        let place_type =
            PlaceType::parse(&row.place_type).ok_or_else(|| ReformImportError::InvalidRow {
                row: row_number,
                message: format!("unknown place type '{}'", row.place_type),
            })?;
        let status =
            ReformStatus::parse(&row.status).ok_or_else(|| ReformImportError::InvalidRow {
                row: row_number,
                message: format!("unknown status '{}'", row.status),
            })?;
        let adopted_on = match row.adopted_on.as_deref() {
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ReformImportError::InvalidRow {
                    row: row_number,
                    message: format!("invalid adoption date '{raw}'"),
                }
            })?),
            None => None,
        };

        let mut reform_type_codes = Vec::new();
        for code in row.reform_types.split(';') {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            if catalog.contains(code) {
                reform_type_codes.push(code.to_string());
            } else {
                report.unknown_codes.push(code.to_string());
            }
        }
        if reform_type_codes.is_empty() {
            report.skipped_rows += 1;
            continue;
        }

        let place_id = PlaceId(place_slug(&row.state, &row.place));
        let reform_id = format!("{}#{}", place_id.0, row_number);

        report.imported.push(ImportedReform {
            place: Place {
                id: place_id.clone(),
                name: row.place,
                place_type,
                state_code: Some(row.state.to_ascii_uppercase()),
                region: row.region,
                population: row.population,
                latitude: row.latitude,
                longitude: row.longitude,
            },
            reform: Reform {
                id: reform_id,
                place_id,
                status,
                adopted_on,
                bill_name: row.bill_name,
                scope: split_list(row.scope.as_deref()),
                land_use: split_list(row.land_use.as_deref()),
                requirements: split_list(row.requirements.as_deref()),
                reform_type_codes,
            },
        });
    }

    Ok(report)
}

#[derive(Debug, Deserialize)]
struct ReformRow {
    place: String,
    state: String,
    place_type: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    adopted_on: Option<String>,
    bill_name: String,
    reform_types: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    scope: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    land_use: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requirements: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn place_slug(state: &str, name: &str) -> String {
    let state = state.trim().to_ascii_lowercase();
    let name: String = name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("{state}/{name}")
}

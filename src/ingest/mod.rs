//! File ingestion: issuer files to normalized records
//!
//! Reads the upstream export layout (one row per issuer, five required
//! columns) from CSV or Excel and normalizes it into [`Issuer`] records.
//! Nothing is guessed: a missing column, a blank required cell, a
//! non-numeric weight or an unparseable date rejects the file with the row
//! that caused it.
//!
//! Header names are matched after trimming, and fully blank rows are
//! skipped, since hand-maintained spreadsheets tend to contain both.

use chrono::NaiveDate;
use std::path::Path;

use crate::models::Issuer;

pub mod csv;
pub mod error;
pub mod excel;

pub use error::{IngestError, IngestResult};

/// Issuer identifier column
pub const COL_ID: &str = "DMX_ISSUER_ID";
/// Issuer display name column
pub const COL_NAME: &str = "DMX_ISSUER_NAME";
/// Point total column
pub const COL_WEIGHT: &str = "TOTAL";
/// Country of domicile column
pub const COL_COUNTRY: &str = "COUNTRY_DOMICILE";
/// Scheduled run date column
pub const COL_DATE: &str = "RUN_DATE";

/// All required columns, in output order
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_ID, COL_NAME, COL_WEIGHT, COL_COUNTRY, COL_DATE];

/// Read issuers from a file, dispatching on the extension
pub fn read_issuers(path: &Path) -> IngestResult<Vec<Issuer>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => csv::read_file(path),
        "xlsx" | "xls" => excel::read_file(path),
        other => Err(IngestError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a weight cell
///
/// Thousands separators are tolerated; the parsed value must be finite and
/// non-negative.
pub(crate) fn parse_weight(raw: &str, row: usize) -> IngestResult<f64> {
    let cleaned = raw.trim().replace(',', "");
    let value: f64 = cleaned.parse().map_err(|_| IngestError::InvalidWeight {
        row,
        value: raw.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(IngestError::InvalidWeight {
            row,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse a run date cell
///
/// Accepts ISO `YYYY-MM-DD`, compact `YYYYMMDD` and US `MM/DD/YYYY`.
pub(crate) fn parse_run_date(raw: &str, row: usize) -> IngestResult<NaiveDate> {
    let trimmed = raw.trim();
    // Datetime exports often append a midnight time; drop it
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);

    for format in ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Ok(date);
        }
    }

    Err(IngestError::InvalidDate {
        row,
        value: raw.to_string(),
    })
}

/// Build an issuer from raw cell values, rejecting blank required fields
pub(crate) fn build_issuer(
    row: usize,
    id: &str,
    name: &str,
    weight: &str,
    country: &str,
    run_date: &str,
) -> IngestResult<Issuer> {
    let required = [
        (COL_ID, id),
        (COL_NAME, name),
        (COL_WEIGHT, weight),
        (COL_COUNTRY, country),
        (COL_DATE, run_date),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(IngestError::MissingField {
                row,
                field: field.to_string(),
            });
        }
    }

    Ok(Issuer::new(
        id.trim(),
        name.trim(),
        parse_weight(weight, row)?,
        country.trim().to_ascii_uppercase(),
        parse_run_date(run_date, row)?,
    ))
}

//! CSV issuer file reader

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::models::Issuer;

use super::error::{IngestError, IngestResult};
use super::{build_issuer, COL_COUNTRY, COL_DATE, COL_ID, COL_NAME, COL_WEIGHT};

/// Read issuers from a headered CSV file
pub fn read_file(path: &Path) -> IngestResult<Vec<Issuer>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = column_index(&headers)?;

    let mut issuers = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is row 1; data rows are reported 1-based after it
        let row = row_idx + 2;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |column: &str| -> String {
            columns
                .get(column)
                .and_then(|&idx| record.get(idx))
                .unwrap_or("")
                .to_string()
        };

        issuers.push(build_issuer(
            row,
            &cell(COL_ID),
            &cell(COL_NAME),
            &cell(COL_WEIGHT),
            &cell(COL_COUNTRY),
            &cell(COL_DATE),
        )?);
    }

    tracing::debug!(path = %path.display(), issuers = issuers.len(), "csv file read");
    Ok(issuers)
}

/// Map required column names to their positions in the header row
fn column_index(headers: &[String]) -> IngestResult<HashMap<String, usize>> {
    let mut columns = HashMap::new();
    for required in super::REQUIRED_COLUMNS {
        let position = headers
            .iter()
            .position(|h| h == required)
            .ok_or_else(|| IngestError::MissingColumn(required.to_string()))?;
        columns.insert(required.to_string(), position);
    }
    Ok(columns)
}

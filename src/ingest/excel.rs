//! Excel issuer file reader
//!
//! Reads the first worksheet of an `.xlsx`/`.xls` workbook. The header row
//! is matched by column name, so column order in the sheet does not matter.
//! Date cells may arrive as real Excel datetimes, as serial numbers, or as
//! text; all three are handled.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::path::Path;

use crate::models::Issuer;

use super::error::{IngestError, IngestResult};
use super::{parse_run_date, parse_weight, COL_COUNTRY, COL_DATE, COL_ID, COL_NAME, COL_WEIGHT};

/// Excel serial dates count days from this epoch
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Read issuers from the first worksheet of a workbook
pub fn read_file(path: &Path) -> IngestResult<Vec<Issuer>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| IngestError::Excel(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::Excel("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Excel(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| IngestError::EmptySheet(sheet_name.clone()))?;

    let headers: Vec<String> = header_row.iter().map(|cell| cell_text(cell)).collect();
    let columns = column_index(&headers)?;

    let mut issuers = Vec::new();
    for (row_idx, cells) in rows.enumerate() {
        let row = row_idx + 2;

        if cells.iter().all(|cell| cell_text(cell).is_empty()) {
            continue;
        }

        let cell = |column: &str| -> Data {
            columns
                .get(column)
                .and_then(|&idx| cells.get(idx))
                .cloned()
                .unwrap_or(Data::Empty)
        };

        let id = cell_text(&cell(COL_ID));
        let name = cell_text(&cell(COL_NAME));
        let country = cell_text(&cell(COL_COUNTRY));
        if id.is_empty() || name.is_empty() || country.is_empty() {
            let field = if id.is_empty() {
                COL_ID
            } else if name.is_empty() {
                COL_NAME
            } else {
                COL_COUNTRY
            };
            return Err(IngestError::MissingField {
                row,
                field: field.to_string(),
            });
        }

        issuers.push(Issuer::new(
            id,
            name,
            cell_weight(&cell(COL_WEIGHT), row)?,
            country.to_ascii_uppercase(),
            cell_date(&cell(COL_DATE), row)?,
        ));
    }

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_name,
        issuers = issuers.len(),
        "excel file read"
    );
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

/// Cell content as trimmed text
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Extract a weight from a numeric or text cell
fn cell_weight(cell: &Data, row: usize) -> IngestResult<f64> {
    match cell {
        Data::Float(value) => {
            if value.is_finite() && *value >= 0.0 {
                Ok(*value)
            } else {
                Err(IngestError::InvalidWeight {
                    row,
                    value: value.to_string(),
                })
            }
        }
        Data::Int(value) => {
            if *value >= 0 {
                Ok(*value as f64)
            } else {
                Err(IngestError::InvalidWeight {
                    row,
                    value: value.to_string(),
                })
            }
        }
        Data::String(text) => parse_weight(text, row),
        other => Err(IngestError::InvalidWeight {
            row,
            value: cell_text(other),
        }),
    }
}

/// Extract a run date from a datetime, serial-number or text cell
fn cell_date(cell: &Data, row: usize) -> IngestResult<NaiveDate> {
    match cell {
        Data::DateTime(dt) => serial_to_date(dt.as_f64(), row),
        Data::Float(serial) => serial_to_date(*serial, row),
        Data::Int(serial) => serial_to_date(*serial as f64, row),
        Data::String(text) => parse_run_date(text, row),
        Data::DateTimeIso(text) => parse_run_date(text, row),
        other => Err(IngestError::InvalidDate {
            row,
            value: cell_text(other),
        }),
    }
}

/// Convert an Excel serial day number to a calendar date
fn serial_to_date(serial: f64, row: usize) -> IngestResult<NaiveDate> {
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d).expect("valid epoch");

    if !serial.is_finite() || serial < 0.0 {
        return Err(IngestError::InvalidDate {
            row,
            value: serial.to_string(),
        });
    }
    Ok(epoch + Duration::days(serial as i64))
}

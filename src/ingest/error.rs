//! Error types for file ingestion

use thiserror::Error;

/// Result type for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while reading issuer files
#[derive(Error, Debug)]
pub enum IngestError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Extension is not one of the supported formats
    #[error("Unsupported file format: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A row has no value for a required field
    #[error("Row {row}: missing value for {field}")]
    MissingField { row: usize, field: String },

    /// A weight cell could not be parsed as a finite non-negative number
    #[error("Row {row}: invalid weight '{value}'")]
    InvalidWeight { row: usize, value: String },

    /// A run date cell could not be parsed
    #[error("Row {row}: invalid run date '{value}' (expected YYYY-MM-DD, YYYYMMDD or MM/DD/YYYY)")]
    InvalidDate { row: usize, value: String },

    /// Workbook could not be opened or read
    #[error("Excel error: {0}")]
    Excel(String),

    /// Worksheet exists but holds no data rows
    #[error("Worksheet '{0}' is empty")]
    EmptySheet(String),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

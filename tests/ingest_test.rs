//! Ingestion tests over real files on disk

use std::io::Write;

use chrono::NaiveDate;
use nanum::ingest::{self, IngestError};
use tempfile::NamedTempFile;

/// Write CSV content to a temp file with a .csv name
fn csv_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

#[test]
fn test_read_well_formed_csv() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme Holdings,10.5,US,2024-03-01\n\
         ISS-2,Globex,5,fr,2024-03-02\n",
    );

    let issuers = ingest::read_issuers(file.path()).unwrap();

    assert_eq!(issuers.len(), 2);
    assert_eq!(issuers[0].id, "ISS-1");
    assert_eq!(issuers[0].weight, 10.5);
    assert_eq!(issuers[0].run_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    // Country codes are normalized to upper case
    assert_eq!(issuers[1].country_code, "FR");
}

#[test]
fn test_extra_columns_and_order_do_not_matter() {
    let file = csv_file(
        "RUN_DATE,EXTRA,TOTAL,DMX_ISSUER_ID,COUNTRY_DOMICILE,DMX_ISSUER_NAME\n\
         2024-03-01,ignored,7,ISS-1,US,Acme\n",
    );

    let issuers = ingest::read_issuers(file.path()).unwrap();

    assert_eq!(issuers.len(), 1);
    assert_eq!(issuers[0].weight, 7.0);
    assert_eq!(issuers[0].name, "Acme");
}

#[test]
fn test_blank_rows_are_skipped() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme,1,US,2024-03-01\n\
         ,,,,\n\
         ISS-2,Globex,2,FR,2024-03-02\n",
    );

    let issuers = ingest::read_issuers(file.path()).unwrap();
    assert_eq!(issuers.len(), 2);
}

#[test]
fn test_missing_column_is_reported() {
    let file = csv_file("DMX_ISSUER_ID,DMX_ISSUER_NAME,COUNTRY_DOMICILE,RUN_DATE\nISS-1,Acme,US,2024-03-01\n");

    let err = ingest::read_issuers(file.path()).unwrap_err();
    match err {
        IngestError::MissingColumn(column) => assert_eq!(column, "TOTAL"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_weight_names_the_row() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme,1,US,2024-03-01\n\
         ISS-2,Globex,lots,FR,2024-03-02\n",
    );

    let err = ingest::read_issuers(file.path()).unwrap_err();
    match err {
        IngestError::InvalidWeight { row, value } => {
            assert_eq!(row, 3);
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_date_names_the_row() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme,1,US,someday\n",
    );

    let err = ingest::read_issuers(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidDate { row: 2, .. }));
}

#[test]
fn test_blank_required_cell_is_reported() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ,Acme,1,US,2024-03-01\n",
    );

    let err = ingest::read_issuers(file.path()).unwrap_err();
    match err {
        IngestError::MissingField { row, field } => {
            assert_eq!(row, 2);
            assert_eq!(field, "DMX_ISSUER_ID");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_compact_and_us_date_formats() {
    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme,1,US,20240301\n\
         ISS-2,Globex,2,FR,03/02/2024\n",
    );

    let issuers = ingest::read_issuers(file.path()).unwrap();
    assert_eq!(issuers[0].run_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(issuers[1].run_date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
}

#[test]
fn test_missing_file() {
    let err = ingest::read_issuers(std::path::Path::new("does/not/exist.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("temp file");
    file.write_all(b"whatever").unwrap();

    let err = ingest::read_issuers(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}

#[test]
fn test_ingested_file_flows_into_allocation() {
    use nanum::allocator::{validate, Allocator, Roster};

    let file = csv_file(
        "DMX_ISSUER_ID,DMX_ISSUER_NAME,TOTAL,COUNTRY_DOMICILE,RUN_DATE\n\
         ISS-1,Acme,10,US,2024-03-01\n\
         ISS-2,Globex,5,FR,2024-03-01\n\
         ISS-3,Initech,8,US,2024-03-02\n",
    );

    let issuers = ingest::read_issuers(file.path()).unwrap();
    let roster = Roster::parse("A, B").unwrap();

    let run = Allocator::new().run(&issuers, &roster).unwrap();
    let report = validate(&run.entries, &roster).unwrap();

    assert!(run.covers(&issuers));
    assert_eq!(report.member("A").unwrap().total, 10.0);
    assert_eq!(report.member("B").unwrap().total, 13.0);
}

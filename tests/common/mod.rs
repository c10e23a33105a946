//! Common test utilities

use chrono::NaiveDate;
use nanum::models::Issuer;

/// Run date within the fixture month
pub fn run_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid fixture date")
}

/// Create a test issuer with the given id, weight, country and day
pub fn create_issuer(id: &str, weight: f64, country: &str, day: u32) -> Issuer {
    Issuer::new(id, format!("Issuer {id}"), weight, country, run_date(day))
}

/// A mixed-tier fixture population: home, close, broad, emerging and
/// unranked issuers over three run dates
#[allow(dead_code)]
pub fn mixed_population() -> Vec<Issuer> {
    vec![
        create_issuer("US-1", 40.0, "US", 1),
        create_issuer("US-2", 25.0, "US", 2),
        create_issuer("GB-1", 30.0, "GB", 1),
        create_issuer("FR-1", 15.0, "FR", 2),
        create_issuer("DE-1", 20.0, "DE", 3),
        create_issuer("BR-1", 10.0, "BR", 1),
        create_issuer("XX-1", 5.0, "XX", 3),
        create_issuer("CN-1", 35.0, "CN", 2),
    ]
}

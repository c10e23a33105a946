// Core data structures for nanum allocation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::allocator::AllocationStrategy;

/// Normalized issuer record
///
/// Read-only input for one allocation pass. Produced by the ingest layer
/// (or constructed directly by callers) and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: String,
    pub name: String,
    pub weight: f64, // point total, finite and non-negative
    pub country_code: String,
    pub run_date: NaiveDate,
}

impl Issuer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: f64,
        country_code: impl Into<String>,
        run_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            country_code: country_code.into(),
            run_date,
        }
    }

    /// Check field validity, returning the reason on failure
    ///
    /// The engine refuses to guess defaults: a blank id or a weight that is
    /// not a finite non-negative number rejects the whole pass.
    pub fn check(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("issuer id is empty".to_string());
        }
        if !self.weight.is_finite() {
            return Err(format!("weight '{}' is not a finite number", self.weight));
        }
        if self.weight < 0.0 {
            return Err(format!("weight {} is negative", self.weight));
        }
        if self.country_code.trim().is_empty() {
            return Err("country code is empty".to_string());
        }
        Ok(())
    }
}

/// Single allocation decision: one issuer assigned to one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub issuer_id: String,
    pub issuer_name: String,
    pub weight: f64,
    pub country_code: String,
    pub run_date: NaiveDate,
    pub member: String,
}

impl AllocationEntry {
    /// Build an entry for an issuer assigned to a member
    pub fn from_issuer(issuer: &Issuer, member: impl Into<String>) -> Self {
        Self {
            issuer_id: issuer.id.clone(),
            issuer_name: issuer.name.clone(),
            weight: issuer.weight,
            country_code: issuer.country_code.clone(),
            run_date: issuer.run_date,
            member: member.into(),
        }
    }

    /// Check if this entry was assigned to a specific member
    pub fn is_for_member(&self, name: &str) -> bool {
        self.member == name
    }
}

/// Complete result of one allocation pass
///
/// Entries are kept in strategy processing order; use
/// [`AllocationRun::in_input_order`] to re-order for display or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRun {
    /// Strategy that produced this run
    pub strategy: AllocationStrategy,

    /// One entry per input issuer, in processing order
    pub entries: Vec<AllocationEntry>,

    /// When this run was produced
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl AllocationRun {
    /// Create a run from produced entries
    pub fn new(strategy: AllocationStrategy, entries: Vec<AllocationEntry>) -> Self {
        Self {
            strategy,
            entries,
            generated_at: Utc::now(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the run is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated weight
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// All entries assigned to a specific member
    pub fn entries_for_member(&self, name: &str) -> Vec<&AllocationEntry> {
        self.entries.iter().filter(|e| e.is_for_member(name)).collect()
    }

    /// Set of allocated issuer ids
    pub fn issuer_ids(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.issuer_id.as_str()).collect()
    }

    /// Check that the run covers exactly the given input issuers
    ///
    /// True when the output id-set equals the input id-set and no id was
    /// assigned twice.
    pub fn covers(&self, issuers: &[Issuer]) -> bool {
        let input: BTreeSet<&str> = issuers.iter().map(|i| i.id.as_str()).collect();
        self.issuer_ids() == input && self.entries.len() == input.len()
    }

    /// Entries re-ordered to match the input issuer order
    ///
    /// Issuers absent from the run are skipped; duplicate input ids yield
    /// the single entry recorded for the first occurrence.
    pub fn in_input_order(&self, issuers: &[Issuer]) -> Vec<&AllocationEntry> {
        let mut seen = BTreeSet::new();
        issuers
            .iter()
            .filter(|issuer| seen.insert(issuer.id.as_str()))
            .filter_map(|issuer| self.entries.iter().find(|e| e.issuer_id == issuer.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_issuer_check_accepts_valid() {
        let issuer = Issuer::new("ISS-1", "Acme", 10.0, "US", date(1));
        assert!(issuer.check().is_ok());
    }

    #[test]
    fn test_issuer_check_rejects_bad_fields() {
        let blank_id = Issuer::new("  ", "Acme", 10.0, "US", date(1));
        assert!(blank_id.check().is_err());

        let negative = Issuer::new("ISS-1", "Acme", -1.0, "US", date(1));
        assert!(negative.check().unwrap_err().contains("negative"));

        let nan = Issuer::new("ISS-1", "Acme", f64::NAN, "US", date(1));
        assert!(nan.check().unwrap_err().contains("finite"));

        let no_country = Issuer::new("ISS-1", "Acme", 10.0, "", date(1));
        assert!(no_country.check().is_err());
    }

    #[test]
    fn test_entry_from_issuer() {
        let issuer = Issuer::new("ISS-1", "Acme", 10.0, "US", date(1));
        let entry = AllocationEntry::from_issuer(&issuer, "alice");

        assert_eq!(entry.issuer_id, "ISS-1");
        assert_eq!(entry.weight, 10.0);
        assert_eq!(entry.run_date, date(1));
        assert!(entry.is_for_member("alice"));
        assert!(!entry.is_for_member("bob"));
    }

    #[test]
    fn test_run_covers() {
        let issuers = vec![
            Issuer::new("a", "A", 1.0, "US", date(1)),
            Issuer::new("b", "B", 2.0, "FR", date(2)),
        ];
        let entries = vec![
            AllocationEntry::from_issuer(&issuers[1], "alice"),
            AllocationEntry::from_issuer(&issuers[0], "bob"),
        ];
        let run = AllocationRun::new(AllocationStrategy::TierGreedy, entries);

        assert!(run.covers(&issuers));
        assert_eq!(run.total_weight(), 3.0);
    }

    #[test]
    fn test_run_in_input_order() {
        let issuers = vec![
            Issuer::new("a", "A", 1.0, "US", date(1)),
            Issuer::new("b", "B", 2.0, "FR", date(2)),
            Issuer::new("c", "C", 3.0, "DE", date(3)),
        ];
        // Processing order differs from input order
        let entries = vec![
            AllocationEntry::from_issuer(&issuers[2], "alice"),
            AllocationEntry::from_issuer(&issuers[0], "bob"),
            AllocationEntry::from_issuer(&issuers[1], "alice"),
        ];
        let run = AllocationRun::new(AllocationStrategy::TierGreedy, entries);

        let ordered = run.in_input_order(&issuers);
        let ids: Vec<&str> = ordered.iter().map(|e| e.issuer_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_run_entries_for_member() {
        let issuers = vec![
            Issuer::new("a", "A", 1.0, "US", date(1)),
            Issuer::new("b", "B", 2.0, "FR", date(2)),
        ];
        let entries = vec![
            AllocationEntry::from_issuer(&issuers[0], "alice"),
            AllocationEntry::from_issuer(&issuers[1], "alice"),
        ];
        let run = AllocationRun::new(AllocationStrategy::PhasedRoundRobin, entries);

        assert_eq!(run.entries_for_member("alice").len(), 2);
        assert!(run.entries_for_member("bob").is_empty());
    }
}

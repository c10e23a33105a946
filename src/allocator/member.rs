//! Team member state and roster handling
//!
//! A [`TeamMember`] is the single mutable record an allocation pass owns for
//! each worker: the cumulative point total and the set of distinct run dates
//! assigned so far. State is created fresh at the start of every pass and
//! discarded once the balance report has been produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::error::{AllocatorError, AllocatorResult};

// ============================================================================
// Team Member
// ============================================================================

/// Per-member state for a single allocation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member name, unique within the roster
    pub name: String,

    /// Cumulative weight of all issuers assigned so far
    pub running_total: f64,

    /// Distinct run dates assigned so far
    ///
    /// `BTreeSet` keeps iteration in date order, so nothing downstream
    /// depends on hash ordering.
    pub assigned_dates: BTreeSet<NaiveDate>,
}

impl TeamMember {
    /// Create a member with zeroed state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running_total: 0.0,
            assigned_dates: BTreeSet::new(),
        }
    }

    /// Number of distinct run dates held
    pub fn date_count(&self) -> usize {
        self.assigned_dates.len()
    }

    /// Check whether this member already holds a run date
    pub fn holds_date(&self, date: NaiveDate) -> bool {
        self.assigned_dates.contains(&date)
    }

    /// Record an assignment: add the weight and the run date
    pub fn record(&mut self, weight: f64, date: NaiveDate) {
        self.running_total += weight;
        self.assigned_dates.insert(date);
    }
}

// ============================================================================
// Roster
// ============================================================================

/// Ordered roster of unique team member names
///
/// Roster order is significant: every tie-break in both strategies resolves
/// to the first matching member in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster from member names
    ///
    /// Names are trimmed. Rejects an empty roster, blank names, and
    /// duplicates.
    pub fn new(names: Vec<String>) -> AllocatorResult<Self> {
        let mut seen = BTreeSet::new();
        let mut cleaned = Vec::with_capacity(names.len());

        for (position, raw) in names.iter().enumerate() {
            let name = raw.trim();
            if name.is_empty() {
                return Err(AllocatorError::BlankMember { position });
            }
            if !seen.insert(name.to_string()) {
                return Err(AllocatorError::duplicate_member(name));
            }
            cleaned.push(name.to_string());
        }

        if cleaned.is_empty() {
            return Err(AllocatorError::EmptyRoster);
        }

        Ok(Self { names: cleaned })
    }

    /// Parse a comma-separated member list, e.g. `"alice, bob, carol"`
    ///
    /// Empty segments are skipped, so a trailing comma is harmless.
    pub fn parse(input: &str) -> AllocatorResult<Self> {
        let names: Vec<String> = input
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self::new(names)
    }

    /// Member names in roster order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the roster has no members
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check membership by name
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Create fresh member state for an allocation pass
    pub fn members(&self) -> Vec<TeamMember> {
        self.names.iter().map(|name| TeamMember::new(name.as_str())).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Post-allocation balance validation
//!
//! Consumes the allocation output and the roster, and computes per-member
//! totals, deviation from the global average, and distinct-date counts.
//! Pure: nothing here mutates the entries or the roster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::AllocationEntry;

use super::error::{AllocatorError, AllocatorResult};
use super::member::Roster;

// ============================================================================
// Balance Report
// ============================================================================

/// Balance figures for a single member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Member name
    pub member: String,

    /// Total weight assigned to this member
    pub total: f64,

    /// Total minus the global average (positive means above average)
    pub deviation: f64,

    /// Number of distinct run dates assigned
    pub unique_dates: usize,
}

impl MemberBalance {
    /// Check if this member carries more than the average load
    pub fn is_above_average(&self) -> bool {
        self.deviation > 0.0
    }

    /// Check if this member carries less than the average load
    pub fn is_below_average(&self) -> bool {
        self.deviation < 0.0
    }
}

/// Balance report for a full allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Average weight per member over the whole run
    pub average: f64,

    /// Per-member balances, in roster order
    pub members: Vec<MemberBalance>,
}

impl BalanceReport {
    /// Look up the balance for a member by name
    pub fn member(&self, name: &str) -> Option<&MemberBalance> {
        self.members.iter().find(|m| m.member == name)
    }

    /// Difference between the heaviest and lightest member totals
    pub fn spread(&self) -> f64 {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for balance in &self.members {
            min = min.min(balance.total);
            max = max.max(balance.total);
        }
        if self.members.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    /// Largest distinct-date count across members
    pub fn max_unique_dates(&self) -> usize {
        self.members.iter().map(|m| m.unique_dates).max().unwrap_or(0)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate an allocation against its roster
///
/// The average divides the full allocated weight by the roster size, so an
/// empty roster is rejected here rather than producing a silent NaN. An
/// entry naming a member outside the roster is also rejected: it means the
/// allocation and the roster do not belong together.
pub fn validate(entries: &[AllocationEntry], roster: &Roster) -> AllocatorResult<BalanceReport> {
    if roster.is_empty() {
        return Err(AllocatorError::EmptyRoster);
    }

    for entry in entries {
        if !roster.contains(&entry.member) {
            return Err(AllocatorError::unknown_member(entry.member.as_str()));
        }
    }

    let total: f64 = entries.iter().map(|e| e.weight).sum();
    let average = total / roster.len() as f64;

    let members = roster
        .names()
        .iter()
        .map(|name| {
            let mut member_total = 0.0;
            let mut dates = BTreeSet::new();
            for entry in entries.iter().filter(|e| e.is_for_member(name)) {
                member_total += entry.weight;
                dates.insert(entry.run_date);
            }
            MemberBalance {
                member: name.clone(),
                total: member_total,
                deviation: member_total - average,
                unique_dates: dates.len(),
            }
        })
        .collect();

    Ok(BalanceReport { average, members })
}

// ============================================================================
// Tests
// ============================================================================

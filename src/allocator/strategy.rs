//! Allocation strategy selection
//!
//! The two policies are interchangeable: both consume the same issuer
//! sequence and roster, mutate the same per-member state, and produce the
//! same entry shape, so a caller can switch strategy without touching the
//! data model or the validator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AllocatorError;

/// Strategy for assigning issuers to team members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Process issuers in market-tier order with a soft distinct-date cap
    TierGreedy,
    /// Home-market phase first, then round-robin over a fairness ranking
    PhasedRoundRobin,
}

impl AllocationStrategy {
    /// Get all strategies
    pub fn all() -> Vec<Self> {
        vec![Self::TierGreedy, Self::PhasedRoundRobin]
    }

    /// Get strategy ID as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TierGreedy => "tier_greedy",
            Self::PhasedRoundRobin => "phased_round_robin",
        }
    }

    /// Get a one-line description
    pub fn description(&self) -> &'static str {
        match self {
            Self::TierGreedy => "tier-ordered greedy with a soft cap on distinct run dates",
            Self::PhasedRoundRobin => "home market first, round-robin over a fairness ranking",
        }
    }
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        Self::TierGreedy
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AllocationStrategy {
    type Err = AllocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tier_greedy" | "tier-greedy" | "greedy" => Ok(Self::TierGreedy),
            "phased_round_robin" | "phased-round-robin" | "round_robin" | "round-robin" => {
                Ok(Self::PhasedRoundRobin)
            }
            other => Err(AllocatorError::unknown_strategy(other)),
        }
    }
}

//! Allocation engine
//!
//! [`Allocator`] is the single entry point over the two interchangeable
//! policies. It validates the inputs, creates fresh member state for the
//! pass, dispatches to the configured strategy, and wraps the produced
//! entries into an [`AllocationRun`].

use crate::models::{AllocationRun, Issuer};

use super::error::{AllocatorError, AllocatorResult};
use super::member::Roster;
use super::strategy::AllocationStrategy;
use super::tier::DEFAULT_HOME_MARKET;
use super::{greedy, round_robin};

/// Default cap on distinct run dates per member (tier-greedy strategy)
pub const DEFAULT_MAX_DATES: usize = 3;

/// Configurable allocation engine
#[derive(Debug, Clone)]
pub struct Allocator {
    strategy: AllocationStrategy,
    home_market: String,
    max_dates: usize,
}

impl Allocator {
    /// Create an allocator with default settings
    pub fn new() -> Self {
        Self {
            strategy: AllocationStrategy::default(),
            home_market: DEFAULT_HOME_MARKET.to_string(),
            max_dates: DEFAULT_MAX_DATES,
        }
    }

    /// Set the allocation strategy
    pub fn with_strategy(mut self, strategy: AllocationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the home market country code
    pub fn with_home_market(mut self, home_market: impl Into<String>) -> Self {
        self.home_market = home_market.into().trim().to_ascii_uppercase();
        self
    }

    /// Set the distinct-date cap used by the tier-greedy strategy
    ///
    /// Clamped to at least 1; a zero cap would make nobody eligible on
    /// every pick and reduce the cap to noise.
    pub fn with_max_dates(mut self, max_dates: usize) -> Self {
        self.max_dates = max_dates.max(1);
        self
    }

    /// Get the configured strategy
    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Get the configured home market
    pub fn home_market(&self) -> &str {
        &self.home_market
    }

    /// Run one allocation pass
    ///
    /// Validates the roster and every issuer record up front; a bad input
    /// rejects the whole pass before any assignment is made. Worker state
    /// lives only inside this call.
    pub fn run(&self, issuers: &[Issuer], roster: &Roster) -> AllocatorResult<AllocationRun> {
        if roster.is_empty() {
            return Err(AllocatorError::EmptyRoster);
        }
        for issuer in issuers {
            issuer
                .check()
                .map_err(|reason| AllocatorError::invalid_issuer(issuer.id.as_str(), reason))?;
        }

        tracing::info!(
            strategy = %self.strategy,
            issuers = issuers.len(),
            members = roster.len(),
            "starting allocation pass"
        );

        let mut members = roster.members();
        let entries = match self.strategy {
            AllocationStrategy::TierGreedy => {
                greedy::allocate(issuers, &mut members, &self.home_market, self.max_dates)
            }
            AllocationStrategy::PhasedRoundRobin => {
                round_robin::allocate(issuers, &mut members, &self.home_market)
            }
        };

        tracing::info!(entries = entries.len(), "allocation pass complete");
        Ok(AllocationRun::new(self.strategy, entries))
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

//! Issuer allocation engine
//!
//! This module is the decision core: it classifies issuers into market
//! tiers, assigns every issuer to exactly one team member under one of two
//! interchangeable strategies, and validates the balance of the result.
//!
//! # Overview
//!
//! One allocation pass is a pure batch computation. The pass owns all
//! mutable worker state ([`TeamMember`]), created fresh from the roster at
//! the start and discarded once the balance report exists. Given the same
//! issuer sequence and roster order, a pass is fully deterministic: every
//! sort is stable and every tie resolves to roster order.
//!
//! # Architecture
//!
//! ```text
//! issuers ──► MarketTier::classify ──► Allocator ──► AllocationRun ──► validate
//!                                      │
//!                        ┌─────────────┴──────────────┐
//!                        │                            │
//!                  TierGreedy                 PhasedRoundRobin
//!             (tier order, date cap)      (home phase, fairness walk)
//! ```
//!
//! # Modules
//!
//! - [`tier`] - Market-tier classification tables
//! - [`member`] - Team member state and roster handling
//! - [`strategy`] - Strategy selection
//! - `greedy` - Tier-ordered greedy with a soft date cap
//! - `round_robin` - Phased round-robin over a fairness ranking
//! - [`validate`] - Post-allocation balance validation
//! - [`error`] - Allocator error types
//!
//! # Quick Start
//!
//! ```
//! use nanum::allocator::{Allocator, AllocationStrategy, Roster, validate};
//! use nanum::models::Issuer;
//! use chrono::NaiveDate;
//!
//! let issuers = vec![
//!     Issuer::new("ISS-1", "Acme", 10.0, "US",
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
//!     Issuer::new("ISS-2", "Globex", 5.0, "FR",
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
//! ];
//! let roster = Roster::parse("alice, bob").unwrap();
//!
//! let run = Allocator::new()
//!     .with_strategy(AllocationStrategy::TierGreedy)
//!     .run(&issuers, &roster)
//!     .unwrap();
//! let report = validate(&run.entries, &roster).unwrap();
//!
//! assert!(run.covers(&issuers));
//! assert_eq!(report.members.len(), 2);
//! ```

pub mod error;
mod greedy;
pub mod member;
mod round_robin;
pub mod strategy;
pub mod tier;
pub mod validate;

mod engine;

// Re-export main types
pub use engine::{Allocator, DEFAULT_MAX_DATES};
pub use error::{AllocatorError, AllocatorResult};
pub use member::{Roster, TeamMember};
pub use strategy::AllocationStrategy;
pub use tier::{MarketTier, DEFAULT_HOME_MARKET};
pub use validate::{validate, BalanceReport, MemberBalance};

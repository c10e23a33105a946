//! nanum - Issuer Workload Allocator
//!
//! A deterministic allocation system that assigns weighted issuers to a
//! fixed roster of team members, balancing cumulative point totals and
//! bounding how many distinct run dates each member must cover.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`allocator`] - Tier classification, allocation strategies and
//!   balance validation
//! - [`ingest`] - CSV/Excel issuer file ingestion
//! - [`report`] - Rendering and export of allocation results
//! - [`commands`] - CLI command implementations
//!
//! # Example
//!
//! ```
//! use nanum::allocator::{Allocator, Roster, validate};
//! use nanum::models::Issuer;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let issuers = vec![
//!     Issuer::new("ISS-1", "Acme", 10.0, "US", date),
//!     Issuer::new("ISS-2", "Globex", 5.0, "FR", date),
//! ];
//! let roster = Roster::parse("alice, bob").unwrap();
//!
//! let run = Allocator::new().run(&issuers, &roster).unwrap();
//! let report = validate(&run.entries, &roster).unwrap();
//!
//! assert!(run.covers(&issuers));
//! assert_eq!(report.average, 7.5);
//! ```

pub mod allocator;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::allocator::{
        validate, AllocationStrategy, Allocator, BalanceReport, MarketTier, MemberBalance, Roster,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{AllocationEntry, AllocationRun, Issuer};
}

// Direct re-exports for convenience
pub use models::{AllocationEntry, AllocationRun, Issuer};

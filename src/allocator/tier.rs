//! Market-tier classification for issuer prioritization
//!
//! Maps an issuer's country of domicile to an integer-ranked priority tier.
//! The home market ranks first, followed by close, broad, and emerging
//! jurisdictions. Codes outside every table fall into the unranked tier,
//! which is never an error.
//!
//! Classification is a pure, total lookup: every input string maps to a
//! tier, and the tier ordering expresses the business priority consumed by
//! the tier-greedy strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Home market used when no override is configured
pub const DEFAULT_HOME_MARKET: &str = "US";

/// Close jurisdictions (tier 1)
const CLOSE_MARKETS: &[&str] = &["AU", "CA", "GB", "HK", "IE", "MY", "NZ", "SG"];

/// Broad jurisdictions (tier 2)
const BROAD_MARKETS: &[&str] = &[
    "AE", "AR", "AT", "AZ", "BE", "BF", "BG", "BH", "BM", "BS", "CH", "CL", "CO", "CR", "CY",
    "CZ", "DE", "DK", "EE", "ES", "FI", "FO", "FR", "GE", "GG", "GI", "GR", "HR", "HU", "ID",
    "IL", "IM", "IN", "JE", "KE", "KW", "KY", "KZ", "LI", "LT", "LU", "MA", "MC", "MN", "MO",
    "MT", "MU", "MX", "NG", "NL", "NO", "OM", "PA", "PE", "PH", "PK", "PL", "PR", "PT", "QA",
    "RO", "SA", "SE", "SK", "SN", "SV", "TG", "TH", "TN", "UA", "UY", "VG", "PG", "CI",
];

/// Emerging jurisdictions (tier 3)
const EMERGING_MARKETS: &[&str] = &["BR", "CN", "EG", "IT", "RU", "TR", "TW", "ZA", "IS"];

// ============================================================================
// Market Tier
// ============================================================================

/// Priority tier derived from an issuer's country code
///
/// Ordering follows the numeric rank, so `Home < Close < Broad < Emerging
/// < Unranked` and sorting by tier processes domestic work first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTier {
    /// The designated home jurisdiction (tier 0)
    Home,
    /// Close jurisdictions (tier 1)
    Close,
    /// Broad coverage jurisdictions (tier 2)
    Broad,
    /// Emerging jurisdictions (tier 3)
    Emerging,
    /// Everything else (tier 4)
    Unranked,
}

impl MarketTier {
    /// Get all tiers in priority order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Home,
            Self::Close,
            Self::Broad,
            Self::Emerging,
            Self::Unranked,
        ]
    }

    /// Get the numeric rank (0 = highest priority)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Home => 0,
            Self::Close => 1,
            Self::Broad => 2,
            Self::Emerging => 3,
            Self::Unranked => 4,
        }
    }

    /// Create from a numeric rank
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Home),
            1 => Some(Self::Close),
            2 => Some(Self::Broad),
            3 => Some(Self::Emerging),
            4 => Some(Self::Unranked),
            _ => None,
        }
    }

    /// Get tier ID as string
    pub fn id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Close => "close",
            Self::Broad => "broad",
            Self::Emerging => "emerging",
            Self::Unranked => "unranked",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Home => "Home (domestic)",
            Self::Close => "Close jurisdictions",
            Self::Broad => "Broad coverage",
            Self::Emerging => "Emerging markets",
            Self::Unranked => "Unranked",
        }
    }

    /// Classify a country code against the default home market
    pub fn classify(country_code: &str) -> Self {
        Self::classify_with_home(country_code, DEFAULT_HOME_MARKET)
    }

    /// Classify a country code against a configured home market
    ///
    /// Case-insensitive and total: any code outside the tier tables is
    /// `Unranked`, never an error. The home check runs first, so a home
    /// market that also appears in a tier table still classifies as `Home`.
    pub fn classify_with_home(country_code: &str, home_market: &str) -> Self {
        let code = country_code.trim().to_ascii_uppercase();

        if code == home_market.trim().to_ascii_uppercase() {
            Self::Home
        } else if CLOSE_MARKETS.contains(&code.as_str()) {
            Self::Close
        } else if BROAD_MARKETS.contains(&code.as_str()) {
            Self::Broad
        } else if EMERGING_MARKETS.contains(&code.as_str()) {
            Self::Emerging
        } else {
            Self::Unranked
        }
    }
}

impl fmt::Display for MarketTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Tests
// ============================================================================

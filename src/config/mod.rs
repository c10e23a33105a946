//! Configuration management for nanum
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. CLI flags override whatever is loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::allocator::{AllocationStrategy, DEFAULT_HOME_MARKET, DEFAULT_MAX_DATES};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Allocation configuration
    pub allocation: AllocationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Allocation-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Home market country code (tier 0 and round-robin phase 1)
    pub home_market: String,

    /// Cap on distinct run dates per member (tier-greedy strategy)
    pub max_dates_per_member: usize,

    /// Default strategy when none is given on the command line
    pub strategy: AllocationStrategy,

    /// Default roster, overridable per run
    #[serde(default)]
    pub members: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let home_market = std::env::var("NANUM_HOME_MARKET")
            .unwrap_or_else(|_| String::from(DEFAULT_HOME_MARKET));

        let max_dates_per_member = std::env::var("NANUM_MAX_DATES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DATES);

        let strategy = match std::env::var("NANUM_STRATEGY") {
            Ok(raw) => raw
                .parse::<AllocationStrategy>()
                .with_context(|| format!("NANUM_STRATEGY is set to '{raw}'"))?,
            Err(_) => AllocationStrategy::default(),
        };

        let members = std::env::var("NANUM_MEMBERS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let log_level = std::env::var("NANUM_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format = std::env::var("NANUM_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            allocation: AllocationConfig {
                home_market,
                max_dates_per_member,
                strategy,
                members,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.allocation.home_market.trim().is_empty() {
            anyhow::bail!("home_market must not be empty");
        }

        if self.allocation.max_dates_per_member == 0 {
            anyhow::bail!("max_dates_per_member must be greater than 0");
        }

        if !["text", "json"].contains(&self.logging.format.as_str()) {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allocation: AllocationConfig {
                home_market: String::from(DEFAULT_HOME_MARKET),
                max_dates_per_member: DEFAULT_MAX_DATES,
                strategy: AllocationStrategy::default(),
                members: Vec::new(),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

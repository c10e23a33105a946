use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::allocator::{validate, AllocationStrategy, Allocator, Roster};
use crate::config::Config;
use crate::ingest;
use crate::report;

/// Output format for the allocate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format '{other}' (expected text, csv or json)"),
        }
    }
}

/// Run a full allocation: ingest, allocate, validate, render
pub fn allocate(
    input: PathBuf,
    members: Option<String>,
    strategy: Option<String>,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let format = OutputFormat::parse(&format)?;
    let roster = resolve_roster(members.as_deref(), &config)?;
    let strategy = resolve_strategy(strategy.as_deref(), &config)?;

    let issuers = ingest::read_issuers(&input)
        .with_context(|| format!("Failed to read issuers from {}", input.display()))?;
    if issuers.is_empty() {
        bail!("{} contains no issuer rows", input.display());
    }

    let allocator = Allocator::new()
        .with_strategy(strategy)
        .with_home_market(&config.allocation.home_market)
        .with_max_dates(config.allocation.max_dates_per_member);

    let run = allocator.run(&issuers, &roster)?;
    let balance = validate(&run.entries, &roster)?;

    match format {
        OutputFormat::Text => {
            println!("{}", report::allocation_table(&run, &issuers));
            println!("{}", report::balance_summary(&balance));
        }
        OutputFormat::Csv => {
            report::write_csv(&run, &issuers, std::io::stdout().lock())?;
        }
        OutputFormat::Json => {
            println!("{}", report::to_json(&run, &balance)?);
        }
    }

    if let Some(path) = output {
        report::write_csv_file(&run, &issuers, &path)?;
        println!("Allocation written to {}", path.display());
    }

    Ok(())
}

/// Show a market-tier breakdown of an input file
pub fn tiers(input: PathBuf) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let issuers = ingest::read_issuers(&input)
        .with_context(|| format!("Failed to read issuers from {}", input.display()))?;

    println!(
        "{}",
        report::tier_breakdown(&issuers, &config.allocation.home_market)
    );
    Ok(())
}

/// Roster from the command line, falling back to configuration
fn resolve_roster(members: Option<&str>, config: &Config) -> Result<Roster> {
    match members {
        Some(raw) => Roster::parse(raw).context("Invalid --members list"),
        None if !config.allocation.members.is_empty() => {
            Roster::new(config.allocation.members.clone())
                .context("Invalid members list in configuration")
        }
        None => bail!("no team members given (use --members or set NANUM_MEMBERS)"),
    }
}

/// Strategy from the command line, falling back to configuration
fn resolve_strategy(strategy: Option<&str>, config: &Config) -> Result<AllocationStrategy> {
    match strategy {
        Some(raw) => raw
            .parse::<AllocationStrategy>()
            .context("Invalid --strategy"),
        None => Ok(config.allocation.strategy),
    }
}

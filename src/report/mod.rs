//! Rendering and export of allocation results
//!
//! Everything user-facing lives here: the fixed-width allocation table, the
//! balance summary, a tier breakdown for input inspection, and CSV/JSON
//! export. Display and export both use input-issuer order, matching the
//! upstream file the user fed in; the in-memory run keeps strategy
//! processing order.

use std::io::Write;
use std::path::Path;

use crate::allocator::{BalanceReport, MarketTier};
use crate::error::Result;
use crate::ingest::{COL_COUNTRY, COL_DATE, COL_ID, COL_NAME, COL_WEIGHT};
use crate::models::{AllocationRun, Issuer};

/// Column header for the assigned member in CSV export
pub const COL_MEMBER: &str = "Team_Member";

// ============================================================================
// Text rendering
// ============================================================================

/// Format the allocation as a fixed-width table in input order
pub fn allocation_table(run: &AllocationRun, issuers: &[Issuer]) -> String {
    let mut output = format!(
        "Allocation ({} issuers, strategy: {})\n",
        run.len(),
        run.strategy
    );
    output.push_str(&format!("{:=<88}\n", ""));
    output.push_str(&format!(
        "{:<14} | {:<28} | {:>10} | {:^7} | {:^10} | {}\n",
        "Issuer ID", "Name", "Points", "Country", "Run Date", "Member"
    ));
    output.push_str(&format!("{:-<88}\n", ""));

    for entry in run.in_input_order(issuers) {
        output.push_str(&format!(
            "{:<14} | {:<28} | {:>10.2} | {:^7} | {} | {}\n",
            entry.issuer_id,
            truncate(&entry.issuer_name, 28),
            entry.weight,
            entry.country_code,
            entry.run_date,
            entry.member
        ));
    }

    output
}

/// Format the balance report as a per-member summary
pub fn balance_summary(report: &BalanceReport) -> String {
    let mut output = String::from("Balance Summary\n");
    output.push_str(&format!("{:-<60}\n", ""));
    output.push_str(&format!("Average points per member: {:.2}\n\n", report.average));

    for balance in &report.members {
        let marker = if balance.is_above_average() {
            "above"
        } else if balance.is_below_average() {
            "below"
        } else {
            "at"
        };
        output.push_str(&format!(
            "{:<16} total {:>10.2} | dates {:>3} | {:>+10.2} ({} average)\n",
            balance.member, balance.total, balance.unique_dates, balance.deviation, marker
        ));
    }

    output.push_str(&format!("\nSpread (max - min total): {:.2}\n", report.spread()));
    output
}

/// Format a classification breakdown of the input issuers
pub fn tier_breakdown(issuers: &[Issuer], home_market: &str) -> String {
    let mut output = format!("Tier breakdown ({} issuers)\n", issuers.len());
    output.push_str(&format!("{:-<56}\n", ""));

    for tier in MarketTier::all() {
        let in_tier: Vec<&Issuer> = issuers
            .iter()
            .filter(|i| MarketTier::classify_with_home(&i.country_code, home_market) == tier)
            .collect();
        let weight: f64 = in_tier.iter().map(|i| i.weight).sum();

        output.push_str(&format!(
            "{:<22} {:>6} issuers | {:>12.2} points\n",
            tier.display_name(),
            in_tier.len(),
            weight
        ));
    }

    output
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ============================================================================
// Export
// ============================================================================

/// Write the allocation as CSV with the upstream column layout
pub fn write_csv<W: Write>(run: &AllocationRun, issuers: &[Issuer], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([COL_ID, COL_NAME, COL_WEIGHT, COL_COUNTRY, COL_DATE, COL_MEMBER])?;

    for entry in run.in_input_order(issuers) {
        let weight = entry.weight.to_string();
        let run_date = entry.run_date.to_string();
        csv_writer.write_record([
            entry.issuer_id.as_str(),
            entry.issuer_name.as_str(),
            weight.as_str(),
            entry.country_code.as_str(),
            run_date.as_str(),
            entry.member.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the allocation as CSV to a file path
pub fn write_csv_file(run: &AllocationRun, issuers: &[Issuer], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(run, issuers, file)?;
    tracing::info!(path = %path.display(), entries = run.len(), "allocation exported");
    Ok(())
}

/// Serialize the run and its balance report as pretty JSON
pub fn to_json(run: &AllocationRun, report: &BalanceReport) -> Result<String> {
    let value = serde_json::json!({
        "strategy": run.strategy,
        "generated_at": run.generated_at,
        "entries": run.entries,
        "balance": report,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

// ============================================================================
// Tests
// ============================================================================

//! Tier-ordered greedy allocation with a soft date cap
//!
//! Issuers are processed in (market tier, run date) order so domestic work
//! is placed first. Each issuer goes to the eligible member with the lowest
//! running total, where eligibility means holding fewer than the capped
//! number of distinct run dates, or already holding this issuer's date.
//! When no member is eligible the cap relaxes to the full roster, so every
//! issuer is always assigned.

use std::collections::HashSet;

use crate::models::{AllocationEntry, Issuer};

use super::member::TeamMember;
use super::tier::MarketTier;

/// Run the tier-greedy policy over the full issuer sequence
///
/// Mutates member state in place and returns entries in processing order.
pub(super) fn allocate(
    issuers: &[Issuer],
    members: &mut [TeamMember],
    home_market: &str,
    max_dates: usize,
) -> Vec<AllocationEntry> {
    // Stable sort: ties keep the original input order
    let mut ordered: Vec<&Issuer> = issuers.iter().collect();
    ordered.sort_by_key(|issuer| {
        (
            MarketTier::classify_with_home(&issuer.country_code, home_market),
            issuer.run_date,
        )
    });

    let mut allocated: HashSet<&str> = HashSet::with_capacity(issuers.len());
    let mut entries = Vec::with_capacity(issuers.len());

    for issuer in ordered {
        // First occurrence of an id wins; later duplicates are skipped
        if !allocated.insert(issuer.id.as_str()) {
            tracing::warn!(issuer = %issuer.id, "duplicate issuer id skipped");
            continue;
        }

        let mut eligible: Vec<usize> = (0..members.len())
            .filter(|&idx| {
                members[idx].date_count() < max_dates
                    || members[idx].holds_date(issuer.run_date)
            })
            .collect();

        // Soft cap: when nobody qualifies, the whole roster becomes eligible
        if eligible.is_empty() {
            tracing::debug!(
                issuer = %issuer.id,
                date = %issuer.run_date,
                max_dates,
                "no member under the date cap, relaxing to full roster"
            );
            eligible = (0..members.len()).collect();
        }

        let chosen = lightest_member(members, &eligible);
        entries.push(AllocationEntry::from_issuer(issuer, members[chosen].name.clone()));
        members[chosen].record(issuer.weight, issuer.run_date);
    }

    entries
}

/// Index of the eligible member with the strictly lowest running total
///
/// Ties resolve to the first candidate in roster order, which keeps the
/// selection deterministic and biases an even start while totals are zero.
fn lightest_member(members: &[TeamMember], eligible: &[usize]) -> usize {
    let mut best = eligible[0];
    for &idx in &eligible[1..] {
        if members[idx].running_total < members[best].running_total {
            best = idx;
        }
    }
    best
}

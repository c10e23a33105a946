//! Phased round-robin allocation over a fairness ranking
//!
//! Issuers split into two phases: the home market is allocated to
//! completion first, then everything else, with member state carried across
//! the phase boundary. Within a phase, issuers are grouped by run date
//! (ascending) and the heaviest issuers in each group are placed first.
//!
//! Selection is not a fixed walk over the literal roster. Before every pick
//! the members are re-ranked by (distinct date count, running total), and
//! the rotating cursor indexes into that fresh ranking. Fairness is thus
//! enforced continuously instead of by a one-time sort, and no date cap is
//! needed.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::models::{AllocationEntry, Issuer};

use super::member::TeamMember;

/// Run the phased round-robin policy over the full issuer sequence
///
/// Mutates member state in place and returns entries in processing order.
pub(super) fn allocate(
    issuers: &[Issuer],
    members: &mut [TeamMember],
    home_market: &str,
) -> Vec<AllocationEntry> {
    let (home, rest): (Vec<&Issuer>, Vec<&Issuer>) = issuers
        .iter()
        .partition(|issuer| issuer.country_code.trim().eq_ignore_ascii_case(home_market.trim()));

    let mut allocated: HashSet<&str> = HashSet::with_capacity(issuers.len());
    let mut entries = Vec::with_capacity(issuers.len());
    let mut cursor = 0usize;

    // Phase 1 finishes before phase 2 starts; totals and date sets carry over
    for (phase, batch) in [(1u8, home), (2u8, rest)] {
        tracing::debug!(phase, issuers = batch.len(), "allocating phase");
        allocate_phase(&batch, members, &mut cursor, &mut allocated, &mut entries);
    }

    entries
}

/// Allocate one phase: date groups in ascending order, heaviest first
fn allocate_phase<'a>(
    batch: &[&'a Issuer],
    members: &mut [TeamMember],
    cursor: &mut usize,
    allocated: &mut HashSet<&'a str>,
    entries: &mut Vec<AllocationEntry>,
) {
    // Ordered map so the ascending-date iteration is guaranteed, not an
    // accident of hashing
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Issuer>> = BTreeMap::new();
    for &issuer in batch {
        by_date.entry(issuer.run_date).or_default().push(issuer);
    }

    for (_, mut group) in by_date {
        // Heaviest first; the sort is stable, so equal weights keep input order
        group.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

        for issuer in group {
            if !allocated.insert(issuer.id.as_str()) {
                tracing::warn!(issuer = %issuer.id, "duplicate issuer id skipped");
                continue;
            }

            // Re-rank before every pick; the cursor walks the ranking, not
            // the roster
            let ranking = fairness_ranking(members);
            let chosen = ranking[*cursor % ranking.len()];
            *cursor += 1;

            entries.push(AllocationEntry::from_issuer(issuer, members[chosen].name.clone()));
            members[chosen].record(issuer.weight, issuer.run_date);
        }
    }
}

/// Member indices ordered by (distinct date count, running total), both
/// ascending; the sort is stable, so ties keep roster order
fn fairness_ranking(members: &[TeamMember]) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..members.len()).collect();
    ranking.sort_by(|&a, &b| {
        members[a]
            .date_count()
            .cmp(&members[b].date_count())
            .then_with(|| {
                members[a]
                    .running_total
                    .partial_cmp(&members[b].running_total)
                    .unwrap_or(Ordering::Equal)
            })
    });
    ranking
}

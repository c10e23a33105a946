//! Property tests for the allocation invariants
//!
//! Generated issuer populations and rosters exercise the contract both
//! strategies share: completeness, weight conservation, roster validity
//! and determinism.

use chrono::NaiveDate;
use nanum::allocator::{validate, AllocationStrategy, Allocator, Roster};
use nanum::models::Issuer;
use proptest::prelude::*;

const COUNTRIES: [&str; 8] = ["US", "GB", "FR", "DE", "BR", "XX", "CN", "AU"];

prop_compose! {
    /// Issuer populations with unique ids, bounded weights and a small
    /// date range so date collisions actually happen
    fn arb_issuers()(
        params in prop::collection::vec(
            (0u32..1_000_000, 0usize..COUNTRIES.len(), 1u32..28),
            0..40,
        )
    ) -> Vec<Issuer> {
        params
            .into_iter()
            .enumerate()
            .map(|(idx, (centi_weight, country, day))| {
                Issuer::new(
                    format!("ISS-{idx}"),
                    format!("Issuer {idx}"),
                    f64::from(centi_weight) / 100.0,
                    COUNTRIES[country],
                    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid day"),
                )
            })
            .collect()
    }
}

prop_compose! {
    fn arb_roster()(size in 1usize..6) -> Roster {
        let names: Vec<String> = (0..size).map(|i| format!("member-{i}")).collect();
        Roster::new(names).expect("generated roster is valid")
    }
}

fn arb_strategy() -> impl Strategy<Value = AllocationStrategy> {
    prop::sample::select(AllocationStrategy::all())
}

proptest! {
    #[test]
    fn prop_allocation_is_complete(
        issuers in arb_issuers(),
        roster in arb_roster(),
        strategy in arb_strategy(),
    ) {
        let run = Allocator::new()
            .with_strategy(strategy)
            .run(&issuers, &roster)
            .unwrap();

        prop_assert!(run.covers(&issuers));
    }

    #[test]
    fn prop_weight_is_conserved(
        issuers in arb_issuers(),
        roster in arb_roster(),
        strategy in arb_strategy(),
    ) {
        let input_total: f64 = issuers.iter().map(|i| i.weight).sum();
        let run = Allocator::new()
            .with_strategy(strategy)
            .run(&issuers, &roster)
            .unwrap();

        prop_assert!((run.total_weight() - input_total).abs() < 1e-6);
    }

    #[test]
    fn prop_entries_only_name_roster_members(
        issuers in arb_issuers(),
        roster in arb_roster(),
        strategy in arb_strategy(),
    ) {
        let run = Allocator::new()
            .with_strategy(strategy)
            .run(&issuers, &roster)
            .unwrap();

        for entry in &run.entries {
            prop_assert!(roster.contains(&entry.member));
        }
    }

    #[test]
    fn prop_runs_are_deterministic(
        issuers in arb_issuers(),
        roster in arb_roster(),
        strategy in arb_strategy(),
    ) {
        let allocator = Allocator::new().with_strategy(strategy);
        let first = allocator.run(&issuers, &roster).unwrap();
        let second = allocator.run(&issuers, &roster).unwrap();

        prop_assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn prop_balance_report_is_consistent(
        issuers in arb_issuers(),
        roster in arb_roster(),
        strategy in arb_strategy(),
    ) {
        let run = Allocator::new()
            .with_strategy(strategy)
            .run(&issuers, &roster)
            .unwrap();
        let report = validate(&run.entries, &roster).unwrap();

        // One balance per roster member, in roster order
        prop_assert_eq!(report.members.len(), roster.len());

        // Totals add back up to the allocated weight
        let sum_of_totals: f64 = report.members.iter().map(|m| m.total).sum();
        prop_assert!((sum_of_totals - run.total_weight()).abs() < 1e-6);

        // Deviations cancel out
        let sum_of_deviations: f64 = report.members.iter().map(|m| m.deviation).sum();
        prop_assert!(sum_of_deviations.abs() < 1e-6);
    }
}

//! Criterion benchmarks for the allocation strategies
//!
//! Uses a synthetic issuer population with a fixed arithmetic pattern so
//! every run measures the same work.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nanum::allocator::{validate, AllocationStrategy, Allocator, Roster};
use nanum::models::Issuer;

const COUNTRIES: [&str; 8] = ["US", "GB", "FR", "DE", "BR", "XX", "CN", "AU"];

/// Deterministic synthetic population: weights, countries and dates cycle
/// through fixed patterns
fn synthetic_issuers(count: usize) -> Vec<Issuer> {
    (0..count)
        .map(|i| {
            let day = (i * 7) % 27 + 1;
            Issuer::new(
                format!("ISS-{i}"),
                format!("Issuer {i}"),
                ((i * 37) % 500) as f64 + 1.0,
                COUNTRIES[(i * 3) % COUNTRIES.len()],
                NaiveDate::from_ymd_opt(2024, 3, day as u32).expect("valid day"),
            )
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let roster = Roster::parse("a, b, c, d, e").expect("valid roster");
    let mut group = c.benchmark_group("allocate");

    for size in [100, 1_000, 5_000] {
        let issuers = synthetic_issuers(size);

        for strategy in AllocationStrategy::all() {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), size),
                &issuers,
                |b, issuers| {
                    let allocator = Allocator::new().with_strategy(strategy);
                    b.iter(|| allocator.run(black_box(issuers), &roster).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let roster = Roster::parse("a, b, c, d, e").expect("valid roster");
    let issuers = synthetic_issuers(1_000);
    let run = Allocator::new().run(&issuers, &roster).expect("allocation succeeds");

    c.bench_function("validate/1000", |b| {
        b.iter(|| validate(black_box(&run.entries), &roster).unwrap())
    });
}

criterion_group!(benches, bench_strategies, bench_validation);
criterion_main!(benches);

//! Performance benchmarks for the analysis core
//!
//! These cover the hot paths of a season sweep: the rank-correlation
//! evaluator, the lap filter and the fastest-lap reducer.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use practice_session_analyzer::laps::{fastest_per_driver, filter_meaningful};
use practice_session_analyzer::models::{LapRecord, RankedList};
use practice_session_analyzer::stats::{predictive_correlation, spearman};
use std::time::Duration;

/// Deterministic pseudo-random sequence for benchmark inputs
fn sequence(len: usize) -> Vec<f64> {
    let mut state = 0x2545f491u64;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as f64
        })
        .collect()
}

/// A field of drivers with several laps each
fn lap_field(drivers: usize, laps_per_driver: usize) -> Vec<LapRecord> {
    let times = sequence(drivers * laps_per_driver);
    (0..drivers * laps_per_driver)
        .map(|i| {
            LapRecord::new(
                format!("D{:02}", i % drivers),
                Duration::from_millis(90_000 + (times[i] as u64 % 20_000)),
            )
        })
        .collect()
}

fn ranked(ids: usize, offset: usize) -> RankedList {
    RankedList::new(
        (0..ids)
            .map(|i| format!("D{:02}", (i + offset) % ids))
            .collect(),
    )
    .unwrap()
}

fn bench_spearman(c: &mut Criterion) {
    let mut group = c.benchmark_group("spearman");
    for size in [20, 200, 2000] {
        let xs = sequence(size);
        let ys = sequence(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| spearman(black_box(&xs), black_box(&ys)).unwrap())
        });
    }
    group.finish();
}

fn bench_predictive_correlation(c: &mut Criterion) {
    let predictor = ranked(20, 7);
    let reference = ranked(20, 0);

    c.bench_function("predictive_correlation_20_drivers", |b| {
        b.iter(|| predictive_correlation(black_box(&predictor), black_box(&reference)).unwrap())
    });
}

fn bench_lap_filter(c: &mut Criterion) {
    let laps = lap_field(20, 30);
    let reference = Duration::from_millis(90_000);

    c.bench_function("filter_meaningful_600_laps", |b| {
        b.iter(|| filter_meaningful(black_box(&laps), reference, 1.2).unwrap())
    });
}

fn bench_fastest_per_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("fastest_per_driver");
    for laps_per_driver in [5, 30] {
        let laps = lap_field(20, laps_per_driver);
        group.bench_with_input(
            BenchmarkId::from_parameter(laps_per_driver * 20),
            &laps,
            |b, laps| b.iter(|| fastest_per_driver(black_box(laps))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_spearman,
    bench_predictive_correlation,
    bench_lap_filter,
    bench_fastest_per_driver
);
criterion_main!(benches);

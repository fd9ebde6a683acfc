//! Resampling, normalization and ranking benchmarks.
//!
//! Run with: `cargo bench --package movers-bench`

use chrono::TimeDelta;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use movers_bench::{synthetic_bars, synthetic_matrix};
use movers_lib::{BarSeries, BucketRule, Interval, daily_report, normalize, resample};
use std::hint::black_box;

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    let hourly_bars = synthetic_bars(10_000, TimeDelta::hours(1), 7);
    let daily_bars = synthetic_bars(5_000, TimeDelta::days(1), 7);
    let hourly = BarSeries::new("BENCH", Interval::Hour1, hourly_bars);
    let daily = BarSeries::new("BENCH", Interval::Day1, daily_bars);
    let cases = [
        ("h2", &hourly, BucketRule::Hours(2)),
        ("h3", &hourly, BucketRule::Hours(3)),
        ("week", &daily, BucketRule::WeekEndingFriday),
        ("month", &daily, BucketRule::Month),
    ];

    for (name, series, rule) in cases {
        group.throughput(Throughput::Elements(series.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), series, |b, series| {
            b.iter(|| resample(black_box(series), rule));
        });
    }

    group.finish();
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let bars = synthetic_bars(10_000, TimeDelta::minutes(15), 3);

    for cap in [60usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(cap as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, &cap| {
            b.iter(|| normalize(black_box(&bars), cap));
        });
    }

    group.finish();
}

fn rank_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_report");
    group.sample_size(20);

    for tickers in [100usize, 500] {
        let (matrix, names) = synthetic_matrix(Interval::Day1, tickers, 5);
        group.throughput(Throughput::Elements(tickers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tickers), &names, |b, names| {
            b.iter(|| daily_report(black_box(&matrix), names, 20));
        });
    }

    group.finish();
}

criterion_group!(benches, resample_benchmark, normalize_benchmark, rank_benchmark);
criterion_main!(benches);

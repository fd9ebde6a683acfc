//! Synthetic market data for movers benchmarks.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use movers_lib::{Bar, BarMatrix, Interval};

/// Start of every synthetic series: Monday 2024-01-01 00:00 UTC.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Generates `n` bars spaced by `step` following a deterministic random walk.
///
/// `seed` shifts the walk so different tickers get different paths.
pub fn synthetic_bars(n: usize, step: TimeDelta, seed: u64) -> Vec<Bar> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut price = 100.0 + (seed % 50) as f64;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let shock = ((state >> 33) as f64 / f64::from(u32::MAX) - 0.5) * 0.04;
            let open = price;
            let close = (price * (1.0 + shock)).max(0.01);
            let high = open.max(close) * 1.005;
            let low = open.min(close) * 0.995;
            price = close;
            let offset = step * i32::try_from(i).unwrap_or(i32::MAX);
            Bar::new(epoch() + offset, open, high, low, close, 1_000.0 + (state % 10_000) as f64)
        })
        .collect()
}

/// Builds a matrix of `tickers` instruments with `n` bars each.
pub fn synthetic_matrix(interval: Interval, tickers: usize, n: usize) -> (BarMatrix, Vec<String>) {
    let step = TimeDelta::seconds(i64::try_from(interval.seconds()).unwrap_or(i64::MAX));
    let names: Vec<String> = (0..tickers).map(|i| format!("T{i:04}")).collect();
    let mut matrix = BarMatrix::new(interval, Vec::new());
    for (seed, name) in names.iter().enumerate() {
        matrix.insert_bars(name, &synthetic_bars(n, step, seed as u64));
    }
    (matrix, names)
}

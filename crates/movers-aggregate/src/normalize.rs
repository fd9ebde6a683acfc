//! Candle list normalization for chart consumption.

use movers_types::Bar;
use tracing::debug;

use crate::Candle;

/// Turns bars into a chart-safe candle list.
///
/// In order: keep the `max_bars` most recent bars by timestamp, drop bars
/// with a non-finite field, widen wicks to cover the body, and keep only the
/// last candle of each timestamp in input order.
///
/// The result has strictly ascending times and every candle satisfies
/// `low <= min(open, close) <= max(open, close) <= high`.
#[must_use]
pub fn normalize(bars: &[Bar], max_bars: usize) -> Vec<Candle> {
    // Stable, so equal timestamps stay in input order and the last one wins.
    let mut ordered: Vec<&Bar> = bars.iter().collect();
    ordered.sort_by_key(|bar| bar.timestamp);
    let recent = &ordered[ordered.len().saturating_sub(max_bars)..];

    let mut candles = Vec::with_capacity(recent.len());
    let mut malformed = 0usize;
    for bar in recent {
        match Candle::try_from(*bar) {
            Ok(candle) => candles.push(candle.repaired()),
            Err(_) => malformed += 1,
        }
    }
    if malformed > 0 {
        debug!(malformed, kept = candles.len(), "dropped malformed candles");
    }

    let mut unique: Vec<Candle> = Vec::with_capacity(candles.len());
    for candle in candles {
        match unique.last_mut() {
            Some(last) if last.time == candle.time => *last = candle,
            _ => unique.push(candle),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use proptest::prelude::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn daily(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let price = 100.0 + i as f64;
                Bar::new(
                    start() + TimeDelta::days(i as i64),
                    price,
                    price + 1.0,
                    price - 1.0,
                    price + 0.5,
                    1000.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_cap_keeps_most_recent() {
        let bars = daily(90);
        let candles = normalize(&bars, 60);

        assert_eq!(candles.len(), 60);
        assert_eq!(candles[0].time, bars[30].timestamp.timestamp());
        assert_eq!(candles[59].time, bars[89].timestamp.timestamp());
    }

    #[test]
    fn test_malformed_bars_dropped() {
        let mut bars = daily(10);
        bars[2].close = f64::NAN;
        bars[7].close = f64::NAN;
        assert_eq!(normalize(&bars, 60).len(), 8);
    }

    #[test]
    fn test_infinite_volume_is_malformed() {
        let mut bars = daily(3);
        bars[1].volume = f64::INFINITY;
        assert_eq!(normalize(&bars, 60).len(), 2);
    }

    #[test]
    fn test_repairs_wicks() {
        let mut bars = daily(1);
        bars[0].high = bars[0].open - 5.0;
        bars[0].low = bars[0].close + 5.0;
        let candle = normalize(&bars, 60)[0];

        assert_eq!(candle.high, bars[0].close);
        assert_eq!(candle.low, bars[0].open);
    }

    #[test]
    fn test_sorts_and_last_duplicate_wins() {
        let bars = daily(3);
        let mut shuffled = vec![bars[2], bars[0], bars[1]];
        let mut replacement = bars[0];
        replacement.close = 42.0;
        replacement.high = 42.0;
        shuffled.push(replacement);

        let candles = normalize(&shuffled, 60);
        let times: Vec<_> = candles.iter().map(|c| c.time).collect();
        assert_eq!(
            times,
            bars.iter().map(|b| b.timestamp.timestamp()).collect::<Vec<_>>()
        );
        assert_eq!(candles[0].close, 42.0);
    }

    #[test]
    fn test_cap_uses_time_order() {
        let bars = daily(3);
        let candles = normalize(&[bars[2], bars[0], bars[1]], 2);
        let times: Vec<_> = candles.iter().map(|c| c.time).collect();
        assert_eq!(
            times,
            [bars[1].timestamp.timestamp(), bars[2].timestamp.timestamp()]
        );
    }

    #[test]
    fn test_cap_keeps_later_duplicate() {
        let bars = daily(3);
        let mut replacement = bars[1];
        replacement.close = 42.0;
        replacement.high = 42.0;

        let candles = normalize(&[bars[1], bars[0], replacement, bars[2]], 2);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, bars[1].timestamp.timestamp());
        assert_eq!(candles[0].close, 42.0);
        assert_eq!(candles[1].time, bars[2].timestamp.timestamp());
    }

    #[test]
    fn test_zero_cap() {
        assert!(normalize(&daily(5), 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_sorted_unique_consistent(
            raw in prop::collection::vec(
                (
                    0i64..50,
                    -10.0f64..10.0,
                    -10.0f64..10.0,
                    -10.0f64..10.0,
                    -10.0f64..10.0,
                    prop::bool::ANY,
                ),
                0..120,
            ),
            cap in 0usize..150,
        ) {
            let bars: Vec<Bar> = raw
                .iter()
                .map(|(offset, o, h, l, c, bad)| {
                    let close = if *bad { f64::NAN } else { *c };
                    Bar::new(start() + TimeDelta::hours(*offset), *o, *h, *l, close, 1.0)
                })
                .collect();
            let candles = normalize(&bars, cap);

            prop_assert!(candles.len() <= cap);
            for pair in candles.windows(2) {
                prop_assert!(pair[0].time < pair[1].time);
            }
            for candle in &candles {
                prop_assert!(candle.is_consistent());
            }
        }
    }
}

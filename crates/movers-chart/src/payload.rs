//! Chart payload assembly.

use movers_aggregate::{BucketRule, Candle, normalize, resample};
use movers_types::{BarMatrix, BarSeries, ChartTimeframe, Interval};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::BarCaps;

/// Candle lists of one instrument, keyed by chart timeframe.
///
/// Every list is independently ascending and duplicate-free. A timeframe
/// without data is an empty list, never a missing key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(skip)]
    ticker: String,
    /// 15-minute candles.
    pub m15: Vec<Candle>,
    /// 1-hour candles.
    pub h1: Vec<Candle>,
    /// 2-hour candles.
    pub h2: Vec<Candle>,
    /// 3-hour candles.
    pub h3: Vec<Candle>,
    /// Daily candles.
    pub day: Vec<Candle>,
    /// Weekly candles.
    pub week: Vec<Candle>,
    /// Monthly candles.
    pub month: Vec<Candle>,
}

impl ChartPayload {
    /// Creates an empty payload for an instrument.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Returns the instrument identifier.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the candles of a timeframe.
    #[must_use]
    pub fn candles(&self, timeframe: ChartTimeframe) -> &[Candle] {
        match timeframe {
            ChartTimeframe::Minute15 => &self.m15,
            ChartTimeframe::Hour1 => &self.h1,
            ChartTimeframe::Hour2 => &self.h2,
            ChartTimeframe::Hour3 => &self.h3,
            ChartTimeframe::Day => &self.day,
            ChartTimeframe::Week => &self.week,
            ChartTimeframe::Month => &self.month,
        }
    }

    fn candles_mut(&mut self, timeframe: ChartTimeframe) -> &mut Vec<Candle> {
        match timeframe {
            ChartTimeframe::Minute15 => &mut self.m15,
            ChartTimeframe::Hour1 => &mut self.h1,
            ChartTimeframe::Hour2 => &mut self.h2,
            ChartTimeframe::Hour3 => &mut self.h3,
            ChartTimeframe::Day => &mut self.day,
            ChartTimeframe::Week => &mut self.week,
            ChartTimeframe::Month => &mut self.month,
        }
    }

    /// Returns the total number of candles over all timeframes.
    #[must_use]
    pub fn candle_count(&self) -> usize {
        ChartTimeframe::all()
            .iter()
            .map(|tf| self.candles(*tf).len())
            .sum()
    }

    /// Returns true if no timeframe has candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candle_count() == 0
    }
}

/// Provider matrices a payload is built from.
///
/// Intraday matrices are optional; a missing one leaves its timeframes empty.
#[derive(Debug, Clone, Copy)]
pub struct ChartSources<'a> {
    /// Daily bars, also resampled to weeks and months.
    pub daily: &'a BarMatrix,
    /// 15-minute bars.
    pub m15: Option<&'a BarMatrix>,
    /// 1-hour bars, also resampled to 2 and 3 hours.
    pub h1: Option<&'a BarMatrix>,
}

impl<'a> ChartSources<'a> {
    fn matrix(&self, interval: Interval) -> Option<&'a BarMatrix> {
        match interval {
            Interval::Day1 => Some(self.daily),
            Interval::Hour1 => self.h1,
            Interval::Minute15 => self.m15,
        }
    }
}

/// Builds the chart payload of one instrument.
#[must_use]
pub fn assemble(ticker: &str, sources: &ChartSources<'_>, caps: &BarCaps) -> ChartPayload {
    let series_for = |interval: Interval| -> BarSeries {
        sources
            .matrix(interval)
            .map_or_else(|| BarSeries::empty(ticker, interval), |m| m.bar_series(ticker))
    };
    let daily = series_for(Interval::Day1);
    let hourly = series_for(Interval::Hour1);
    let quarter_hourly = series_for(Interval::Minute15);

    let mut payload = ChartPayload::new(ticker);
    for timeframe in ChartTimeframe::all() {
        let source = match timeframe.source() {
            Interval::Day1 => &daily,
            Interval::Hour1 => &hourly,
            Interval::Minute15 => &quarter_hourly,
        };
        if source.is_empty() {
            warn!(ticker, %timeframe, "no source bars, leaving timeframe empty");
            continue;
        }
        let candles = match BucketRule::for_timeframe(*timeframe) {
            Some(rule) => normalize(resample(source, rule).bars(), caps.get(*timeframe)),
            None => normalize(source.bars(), caps.get(*timeframe)),
        };
        *payload.candles_mut(*timeframe) = candles;
    }

    debug!(ticker, candles = payload.candle_count(), "chart payload assembled");
    payload
}

/// Returns the distinct tickers in first-seen order.
pub fn chart_tickers<'a, I>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    tickers
        .into_iter()
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use movers_types::Bar;

    fn bars(start: DateTime<Utc>, step: TimeDelta, n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let price = 50.0 + (i % 7) as f64;
                Bar::new(
                    start + step * i as i32,
                    price,
                    price + 2.0,
                    price - 2.0,
                    price + 1.0,
                    10.0,
                )
            })
            .collect()
    }

    fn matrix(interval: Interval, ticker: &str, bars: &[Bar]) -> BarMatrix {
        let mut matrix = BarMatrix::new(interval, Vec::new());
        matrix.insert_bars(ticker, bars);
        matrix
    }

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_assemble_all_timeframes() {
        let daily = matrix(Interval::Day1, "AAA", &bars(monday(), TimeDelta::days(1), 400));
        let hourly = matrix(Interval::Hour1, "AAA", &bars(monday(), TimeDelta::hours(1), 300));
        let quarter = matrix(
            Interval::Minute15,
            "AAA",
            &bars(monday(), TimeDelta::minutes(15), 200),
        );
        let sources = ChartSources {
            daily: &daily,
            m15: Some(&quarter),
            h1: Some(&hourly),
        };
        let payload = assemble("AAA", &sources, &BarCaps::default());

        assert_eq!(payload.ticker(), "AAA");
        assert_eq!(payload.day.len(), 60);
        assert_eq!(payload.week.len(), 26);
        assert_eq!(payload.month.len(), 12);
        assert_eq!(payload.m15.len(), 160);
        assert_eq!(payload.h1.len(), 195);
        assert_eq!(payload.h2.len(), 98);
        assert_eq!(payload.h3.len(), 65);

        for timeframe in ChartTimeframe::all() {
            let candles = payload.candles(*timeframe);
            assert!(candles.windows(2).all(|w| w[0].time < w[1].time));
            assert!(candles.iter().all(Candle::is_consistent));
        }
        // The newest daily candle is the newest input bar.
        let last_day = monday() + TimeDelta::days(399);
        assert_eq!(payload.day.last().unwrap().time, last_day.timestamp());
    }

    #[test]
    fn test_missing_intraday_gives_empty_lists() {
        let daily = matrix(Interval::Day1, "NEW", &bars(monday(), TimeDelta::days(1), 10));
        let sources = ChartSources {
            daily: &daily,
            m15: None,
            h1: None,
        };
        let payload = assemble("NEW", &sources, &BarCaps::default());

        assert_eq!(payload.day.len(), 10);
        assert_eq!(payload.week.len(), 2);
        assert!(payload.m15.is_empty());
        assert!(payload.h2.is_empty());
        assert!(!payload.is_empty());

        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        for key in ["m15", "h1", "h2", "h3", "day", "week", "month"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert!(!object.contains_key("ticker"));
    }

    #[test]
    fn test_unknown_ticker_is_empty_payload() {
        let daily = matrix(Interval::Day1, "AAA", &bars(monday(), TimeDelta::days(1), 10));
        let sources = ChartSources {
            daily: &daily,
            m15: None,
            h1: None,
        };
        assert!(assemble("ZZZ", &sources, &BarCaps::default()).is_empty());
    }

    #[test]
    fn test_chart_tickers_union() {
        let daily = ["AAA", "BBB", "CCC"];
        let weekly = ["BBB", "DDD", "AAA"];
        let tickers = chart_tickers(daily.into_iter().chain(weekly));
        assert_eq!(tickers, ["AAA", "BBB", "CCC", "DDD"]);
    }
}

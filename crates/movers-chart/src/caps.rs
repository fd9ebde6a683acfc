//! Per-timeframe bar limits.

use movers_types::ChartTimeframe;
use serde::{Deserialize, Serialize};

/// Maximum number of candles kept per chart timeframe.
///
/// The defaults give each timeframe a comparable lookback: about 60 trading
/// days of daily bars, about 5 trading days of 15-minute bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarCaps {
    /// 15-minute candles.
    pub m15: usize,
    /// 1-hour candles.
    pub h1: usize,
    /// 2-hour candles.
    pub h2: usize,
    /// 3-hour candles.
    pub h3: usize,
    /// Daily candles.
    pub day: usize,
    /// Weekly candles.
    pub week: usize,
    /// Monthly candles.
    pub month: usize,
}

impl Default for BarCaps {
    fn default() -> Self {
        Self {
            m15: 160,
            h1: 195,
            h2: 98,
            h3: 65,
            day: 60,
            week: 26,
            month: 12,
        }
    }
}

impl BarCaps {
    /// Returns the cap for a timeframe.
    #[must_use]
    pub const fn get(&self, timeframe: ChartTimeframe) -> usize {
        match timeframe {
            ChartTimeframe::Minute15 => self.m15,
            ChartTimeframe::Hour1 => self.h1,
            ChartTimeframe::Hour2 => self.h2,
            ChartTimeframe::Hour3 => self.h3,
            ChartTimeframe::Day => self.day,
            ChartTimeframe::Week => self.week,
            ChartTimeframe::Month => self.month,
        }
    }
}

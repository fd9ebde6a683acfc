//! Pipeline configuration.

use movers_chart::BarCaps;
use movers_rank::DEFAULT_LIMIT;
use movers_types::{Interval, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Calendar-day lookbacks for the intraday chart requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntradayLookback {
    /// Days of 15-minute bars.
    pub m15: u32,
    /// Days of 1-hour bars.
    pub h1: u32,
}

impl Default for IntradayLookback {
    fn default() -> Self {
        Self { m15: 7, h1: 60 }
    }
}

/// Tunables of a pipeline run.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum length of the gainer and loser lists.
    pub mover_limit: usize,
    /// Candle caps per chart timeframe.
    pub bar_caps: BarCaps,
    /// Calendar days of daily bars for the daily report. Five days always
    /// cover the two latest sessions across a weekend.
    pub daily_lookback_days: u32,
    /// Calendar days of daily bars for charts.
    pub chart_daily_lookback_days: u32,
    /// Calendar days of intraday bars for charts.
    pub intraday_lookback_days: IntradayLookback,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mover_limit: DEFAULT_LIMIT,
            bar_caps: BarCaps::default(),
            daily_lookback_days: 5,
            chart_daily_lookback_days: 400,
            intraday_lookback_days: IntradayLookback::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Returns the chart lookback in calendar days for a provider interval.
    #[must_use]
    pub const fn chart_lookback_days(&self, interval: Interval) -> u32 {
        match interval {
            Interval::Minute15 => self.intraday_lookback_days.m15,
            Interval::Hour1 => self.intraday_lookback_days.h1,
            Interval::Day1 => self.chart_daily_lookback_days,
        }
    }
}

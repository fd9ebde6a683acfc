//! Sampling intervals, chart timeframes and report horizons.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling interval of a provider matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 15-minute bars.
    #[serde(rename = "m15")]
    Minute15,
    /// 1-hour bars.
    #[serde(rename = "h1")]
    Hour1,
    /// Daily bars.
    #[default]
    #[serde(rename = "d1")]
    Day1,
}

impl Interval {
    /// Returns the duration in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        match self {
            Self::Minute15 => 900,
            Self::Hour1 => 3600,
            Self::Day1 => 86400,
        }
    }

    /// Returns the interval as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute15 => "m15",
            Self::Hour1 => "h1",
            Self::Day1 => "d1",
        }
    }

    /// Returns all intervals.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute15, Self::Hour1, Self::Day1]
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m15" | "15m" | "minute15" => Ok(Self::Minute15),
            "h1" | "1h" | "60m" | "hour" => Ok(Self::Hour1),
            "d1" | "1d" | "day" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError::new(s, "m15, h1, d1")),
        }
    }
}

/// Chart resolution of a candle list in a chart payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTimeframe {
    /// 15-minute candles.
    #[serde(rename = "m15")]
    Minute15,
    /// 1-hour candles.
    #[serde(rename = "h1")]
    Hour1,
    /// 2-hour candles, resampled from 1-hour bars.
    #[serde(rename = "h2")]
    Hour2,
    /// 3-hour candles, resampled from 1-hour bars.
    #[serde(rename = "h3")]
    Hour3,
    /// Daily candles.
    Day,
    /// Weekly candles, resampled from daily bars.
    Week,
    /// Monthly candles, resampled from daily bars.
    Month,
}

impl ChartTimeframe {
    /// Returns the payload key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute15 => "m15",
            Self::Hour1 => "h1",
            Self::Hour2 => "h2",
            Self::Hour3 => "h3",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Returns the provider interval this timeframe is derived from.
    #[must_use]
    pub const fn source(&self) -> Interval {
        match self {
            Self::Minute15 => Interval::Minute15,
            Self::Hour1 | Self::Hour2 | Self::Hour3 => Interval::Hour1,
            Self::Day | Self::Week | Self::Month => Interval::Day1,
        }
    }

    /// Returns all chart timeframes, finest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute15,
            Self::Hour1,
            Self::Hour2,
            Self::Hour3,
            Self::Day,
            Self::Week,
            Self::Month,
        ]
    }
}

impl std::fmt::Display for ChartTimeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartTimeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m15" | "15m" => Ok(Self::Minute15),
            "h1" | "1h" => Ok(Self::Hour1),
            "h2" | "2h" => Ok(Self::Hour2),
            "h3" | "3h" => Ok(Self::Hour3),
            "day" | "d1" | "1d" => Ok(Self::Day),
            "week" | "w1" | "1w" => Ok(Self::Week),
            "month" | "mo1" | "1mo" => Ok(Self::Month),
            _ => Err(TimeframeParseError::new(
                s,
                "m15, h1, h2, h3, day, week, month",
            )),
        }
    }
}

/// Comparison window of a mover report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// Previous close against latest close.
    #[default]
    Daily,
    /// First against last close of a completed trading week.
    Weekly,
}

impl Horizon {
    /// Returns the horizon name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            _ => Err(TimeframeParseError::new(s, "daily, weekly")),
        }
    }
}

/// Error returned when parsing an invalid interval, timeframe or horizon string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError {
    input: String,
    expected: &'static str,
}

impl TimeframeParseError {
    fn new(input: &str, expected: &'static str) -> Self {
        Self {
            input: input.to_string(),
            expected,
        }
    }
}

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value '{}', expected one of: {}",
            self.input, self.expected
        )
    }
}

impl std::error::Error for TimeframeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_seconds() {
        assert_eq!(Interval::Minute15.seconds(), 900);
        assert_eq!(Interval::Hour1.seconds(), 3600);
        assert_eq!(Interval::Day1.seconds(), 86400);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::Minute15);
        assert_eq!("H1".parse::<Interval>().unwrap(), Interval::Hour1);
        assert!("w1".parse::<Interval>().is_err());
    }

    #[test]
    fn test_chart_timeframe_source() {
        assert_eq!(ChartTimeframe::Hour3.source(), Interval::Hour1);
        assert_eq!(ChartTimeframe::Month.source(), Interval::Day1);
        assert_eq!(ChartTimeframe::Minute15.source(), Interval::Minute15);
    }

    #[test]
    fn test_chart_timeframe_keys() {
        let keys: Vec<_> = ChartTimeframe::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(keys, ["m15", "h1", "h2", "h3", "day", "week", "month"]);
        assert_eq!(
            serde_json::to_string(&ChartTimeframe::Hour2).unwrap(),
            "\"h2\""
        );
    }

    #[test]
    fn test_horizon_parse() {
        assert_eq!("Weekly".parse::<Horizon>().unwrap(), Horizon::Weekly);
        let err = "monthly".parse::<Horizon>().unwrap_err();
        assert!(err.to_string().contains("daily, weekly"));
    }
}

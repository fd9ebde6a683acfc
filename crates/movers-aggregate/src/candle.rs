//! Chart candle data structure.

use chrono::{DateTime, Utc};
use movers_types::Bar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chart-ready candle with an epoch-seconds timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket time as seconds since the Unix epoch.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

/// A bar with a non-finite field cannot become a candle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Malformed candle at {timestamp}: non-finite field")]
pub struct MalformedCandle {
    /// Timestamp of the rejected bar.
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns a copy with `high`/`low` widened to cover open and close.
    #[must_use]
    pub fn repaired(mut self) -> Self {
        self.high = self.high.max(self.open).max(self.close);
        self.low = self.low.min(self.open).min(self.close);
        self
    }

    /// Returns true if `low <= min(open, close) <= max(open, close) <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

impl TryFrom<&Bar> for Candle {
    type Error = MalformedCandle;

    fn try_from(bar: &Bar) -> Result<Self, Self::Error> {
        if !bar.is_finite() {
            return Err(MalformedCandle {
                timestamp: bar.timestamp,
            });
        }
        Ok(Self::new(
            bar.timestamp.timestamp(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
        ))
    }
}

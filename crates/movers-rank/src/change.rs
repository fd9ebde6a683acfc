//! Per-instrument price change over a horizon.

use movers_types::{BarMatrix, DateRange, Field, InsufficiencyReason, InsufficientData};
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places for presentation.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Volume figure attached to a mover record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMetric {
    /// Volume of the latest bar; missing or non-positive volume is zero.
    Latest(u64),
    /// Mean volume over a trading week.
    WeeklyAverage {
        /// Arithmetic mean of the in-window volume samples.
        mean: f64,
        /// Number of in-window closes actually observed.
        days_captured: usize,
    },
}

/// Sign of a record's presented percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Positive change.
    Up,
    /// Negative change.
    Down,
    /// Change rounds to zero.
    Unchanged,
}

/// Price change of one instrument between two reference points.
///
/// The raw percentage is kept for ordering; [`MoverRecord::change_pct`]
/// returns the presented two-decimal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverRecord {
    /// Instrument identifier.
    pub ticker: String,
    /// Reference price (previous close or week start).
    pub start_price: f64,
    /// Comparison price (latest close or week end).
    pub end_price: f64,
    /// Volume figure for the horizon.
    pub volume: VolumeMetric,
    raw_change_pct: f64,
}

impl MoverRecord {
    /// Creates a record from two prices.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficiencyReason::ZeroPrice`] if either price is zero.
    pub fn from_prices(
        ticker: &str,
        start_price: f64,
        end_price: f64,
        volume: VolumeMetric,
    ) -> Result<Self, InsufficientData> {
        if start_price == 0.0 || end_price == 0.0 {
            return Err(InsufficientData::new(ticker, InsufficiencyReason::ZeroPrice));
        }
        let raw_change_pct = (end_price - start_price) / start_price * 100.0;
        Ok(Self {
            ticker: ticker.to_string(),
            start_price,
            end_price,
            volume,
            raw_change_pct,
        })
    }

    /// Returns the absolute change.
    #[must_use]
    pub fn change(&self) -> f64 {
        self.end_price - self.start_price
    }

    /// Returns the unrounded percentage change.
    #[must_use]
    pub const fn raw_change_pct(&self) -> f64 {
        self.raw_change_pct
    }

    /// Returns the percentage change rounded to two decimals.
    #[must_use]
    pub fn change_pct(&self) -> f64 {
        round2(self.raw_change_pct)
    }

    /// Returns the sign of the presented percentage change.
    #[must_use]
    pub fn direction(&self) -> Direction {
        let pct = self.change_pct();
        if pct > 0.0 {
            Direction::Up
        } else if pct < 0.0 {
            Direction::Down
        } else {
            Direction::Unchanged
        }
    }
}

/// Computes the previous-close to latest-close change of one instrument.
///
/// # Errors
///
/// Returns [`InsufficientData`] if the instrument has fewer than two valid
/// closes or a zero close.
pub fn daily_change(matrix: &BarMatrix, ticker: &str) -> Result<MoverRecord, InsufficientData> {
    let closes = matrix.field_series(ticker, Field::Close);
    let [.., prev, current] = closes.samples() else {
        return Err(insufficient(ticker, closes.len()));
    };

    let volume = matrix
        .field_series(ticker, Field::Volume)
        .value_at(current.timestamp)
        .filter(|v| *v > 0.0)
        .map_or(0, |v| v.round() as u64);

    MoverRecord::from_prices(
        ticker,
        prev.value,
        current.value,
        VolumeMetric::Latest(volume),
    )
}

/// Computes the first-to-last close change of one instrument within `window`.
///
/// # Errors
///
/// Returns [`InsufficientData`] if fewer than two closes fall in the window
/// or a reference close is zero.
pub fn weekly_change(
    matrix: &BarMatrix,
    ticker: &str,
    window: DateRange,
) -> Result<MoverRecord, InsufficientData> {
    let closes = matrix.field_series(ticker, Field::Close).within(window);
    let [start, .., end] = closes.samples() else {
        return Err(insufficient(ticker, closes.len()));
    };

    let volumes = matrix.field_series(ticker, Field::Volume).within(window);
    let mean = if volumes.is_empty() {
        0.0
    } else {
        volumes.values().sum::<f64>() / volumes.len() as f64
    };

    MoverRecord::from_prices(
        ticker,
        start.value,
        end.value,
        VolumeMetric::WeeklyAverage {
            mean,
            days_captured: closes.len(),
        },
    )
}

fn insufficient(ticker: &str, found: usize) -> InsufficientData {
    let reason = if found == 0 {
        InsufficiencyReason::NoSamples
    } else {
        InsufficiencyReason::TooFewSamples { found }
    };
    InsufficientData::new(ticker, reason)
}

//! Error types for movers.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{Horizon, Interval};

/// Result type alias for movers operations.
pub type Result<T> = std::result::Result<T, MoversError>;

/// Errors that abort a run.
///
/// Per-instrument problems are reported as [`InsufficientData`] values and
/// never surface here.
#[derive(Error, Debug)]
pub enum MoversError {
    /// The provider returned no data at all for a request.
    #[error("No data returned by provider for {interval} request")]
    NoData {
        /// Sampling interval of the failed request.
        interval: Interval,
    },

    /// Every instrument was filtered out for a horizon.
    #[error("No usable instruments left for the {horizon} horizon")]
    EmptyUniverse {
        /// The horizon that ended up empty.
        horizon: Horizon,
    },

    /// A matrix column does not line up with the matrix index.
    #[error("Column {field} of {ticker} has {found} values, index has {expected}")]
    Shape {
        /// Instrument the column belongs to.
        ticker: String,
        /// Field name of the column.
        field: String,
        /// Length of the timestamp index.
        expected: usize,
        /// Length of the offending column.
        found: usize,
    },

    /// The history provider failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An instrument was dropped from a horizon because its data cannot
/// produce a change record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{ticker}: {reason}")]
pub struct InsufficientData {
    /// The dropped instrument.
    pub ticker: String,
    /// Why it was dropped.
    pub reason: InsufficiencyReason,
}

impl InsufficientData {
    /// Creates a new insufficient-data marker.
    #[must_use]
    pub fn new(ticker: impl Into<String>, reason: InsufficiencyReason) -> Self {
        Self {
            ticker: ticker.into(),
            reason,
        }
    }
}

/// Reason an instrument has insufficient data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficiencyReason {
    /// The provider slice for the instrument is empty.
    #[error("no samples")]
    NoSamples,

    /// Fewer than two valid samples.
    #[error("only {found} valid sample(s), need 2")]
    TooFewSamples {
        /// Number of valid samples found.
        found: usize,
    },

    /// A reference or comparison price is zero.
    #[error("zero price")]
    ZeroPrice,
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = InsufficientData::new("AAPL", InsufficiencyReason::TooFewSamples { found: 1 });
        assert_eq!(err.to_string(), "AAPL: only 1 valid sample(s), need 2");
    }

    #[test]
    fn test_empty_universe_display() {
        let err = MoversError::EmptyUniverse {
            horizon: Horizon::Weekly,
        };
        assert_eq!(err.to_string(), "No usable instruments left for the weekly horizon");
    }
}

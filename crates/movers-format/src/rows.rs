//! Presentation views of mover records.

use movers_rank::{MarketSummary, MoverRecord, VolumeMetric, round2};
use serde::Serialize;

/// One presented row of a mover list, with prices rounded to cents.
///
/// The layout follows the record's volume metric: a latest-volume record
/// becomes a daily row, a weekly-average record a weekly row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MoverRow<'a> {
    /// Previous close to latest close.
    Daily {
        /// Instrument identifier.
        ticker: &'a str,
        /// Latest close.
        price: f64,
        /// Previous close.
        prev_close: f64,
        /// Absolute change.
        change: f64,
        /// Percentage change.
        change_pct: f64,
        /// Volume of the latest bar.
        volume: u64,
    },
    /// First to last close of a trading week.
    Weekly {
        /// Instrument identifier.
        ticker: &'a str,
        /// First in-window close.
        start_price: f64,
        /// Last in-window close.
        end_price: f64,
        /// Absolute change.
        change: f64,
        /// Percentage change.
        change_pct: f64,
        /// Mean in-window volume.
        avg_volume: u64,
        /// Number of in-window closes.
        days_captured: usize,
    },
}

impl<'a> From<&'a MoverRecord> for MoverRow<'a> {
    fn from(record: &'a MoverRecord) -> Self {
        match record.volume {
            VolumeMetric::Latest(volume) => Self::Daily {
                ticker: &record.ticker,
                price: round2(record.end_price),
                prev_close: round2(record.start_price),
                change: round2(record.change()),
                change_pct: record.change_pct(),
                volume,
            },
            VolumeMetric::WeeklyAverage {
                mean,
                days_captured,
            } => Self::Weekly {
                ticker: &record.ticker,
                start_price: round2(record.start_price),
                end_price: round2(record.end_price),
                change: round2(record.change()),
                change_pct: record.change_pct(),
                avg_volume: mean.max(0.0).round() as u64,
                days_captured,
            },
        }
    }
}

/// Presented market summary with the mean rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Number of ranked instruments.
    pub total_stocks: usize,
    /// Instruments that went up.
    pub gainers_count: usize,
    /// Instruments that went down.
    pub losers_count: usize,
    /// Instruments with no presented change.
    pub unchanged_count: usize,
    /// Mean percentage change.
    pub avg_change: f64,
}

impl From<&MarketSummary> for SummaryRow {
    fn from(summary: &MarketSummary) -> Self {
        Self {
            total_stocks: summary.total,
            gainers_count: summary.gainers,
            losers_count: summary.losers,
            unchanged_count: summary.unchanged,
            avg_change: round2(summary.avg_change_pct),
        }
    }
}

/// Formats a percentage with an explicit sign, e.g. `+5.00%`.
pub(crate) fn signed_pct(value: f64) -> String {
    format!("{value:+.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_row() {
        let record =
            MoverRecord::from_prices("AAA", 100.0, 95.0, VolumeMetric::Latest(1200)).unwrap();
        let row = MoverRow::from(&record);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["ticker"], "AAA");
        assert_eq!(json["price"], 95.0);
        assert_eq!(json["prev_close"], 100.0);
        assert_eq!(json["change"], -5.0);
        assert_eq!(json["change_pct"], -5.0);
        assert_eq!(json["volume"], 1200);
    }

    #[test]
    fn test_weekly_row_rounds_volume() {
        let volume = VolumeMetric::WeeklyAverage {
            mean: 250.4,
            days_captured: 5,
        };
        let record = MoverRecord::from_prices("BBB", 50.0, 55.0, volume).unwrap();
        let MoverRow::Weekly {
            avg_volume,
            days_captured,
            change_pct,
            ..
        } = MoverRow::from(&record)
        else {
            panic!("expected weekly row");
        };
        assert_eq!(avg_volume, 250);
        assert_eq!(days_captured, 5);
        assert_eq!(change_pct, 10.0);
    }

    #[test]
    fn test_signed_pct() {
        assert_eq!(signed_pct(5.0), "+5.00%");
        assert_eq!(signed_pct(-5.0), "-5.00%");
        assert_eq!(signed_pct(0.0), "+0.00%");
    }
}

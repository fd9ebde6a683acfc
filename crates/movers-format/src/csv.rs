//! CSV output format.

use movers_chart::ChartPayload;
use movers_rank::MoverRecord;
use movers_types::{ChartTimeframe, Horizon};
use std::io::Write;

use crate::rows::{MoverRow, signed_pct};
use crate::{FormatError, Formatter};

const DAILY_HEADER: [&str; 7] = [
    "Rank",
    "Symbol",
    "Price ($)",
    "Previous Close ($)",
    "Change ($)",
    "Change (%)",
    "Volume",
];

const WEEKLY_HEADER: [&str; 8] = [
    "Rank",
    "Symbol",
    "Start Price ($)",
    "End Price ($)",
    "Change ($)",
    "Change (%)",
    "Avg Volume",
    "Days Captured",
];

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_header: true,
        }
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    fn write_row<W: Write>(writer: &mut W, fields: &[String]) -> Result<(), FormatError> {
        writeln!(writer, "{}", fields.join(","))?;
        Ok(())
    }
}

impl Formatter for CsvFormatter {
    fn write_movers<W: Write + Send>(
        &self,
        horizon: Horizon,
        records: &[MoverRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            let header: &[&str] = match horizon {
                Horizon::Daily => &DAILY_HEADER,
                Horizon::Weekly => &WEEKLY_HEADER,
            };
            let header: Vec<String> = header.iter().map(|h| (*h).to_string()).collect();
            Self::write_row(&mut writer, &header)?;
        }

        for (i, record) in records.iter().enumerate() {
            let rank = (i + 1).to_string();
            let fields = match MoverRow::from(record) {
                MoverRow::Daily {
                    ticker,
                    price,
                    prev_close,
                    change,
                    change_pct,
                    volume,
                } => vec![
                    rank,
                    ticker.to_string(),
                    format!("{price:.2}"),
                    format!("{prev_close:.2}"),
                    format!("{change:.2}"),
                    signed_pct(change_pct),
                    volume.to_string(),
                ],
                MoverRow::Weekly {
                    ticker,
                    start_price,
                    end_price,
                    change,
                    change_pct,
                    avg_volume,
                    days_captured,
                } => vec![
                    rank,
                    ticker.to_string(),
                    format!("{start_price:.2}"),
                    format!("{end_price:.2}"),
                    format!("{change:.2}"),
                    signed_pct(change_pct),
                    avg_volume.to_string(),
                    days_captured.to_string(),
                ],
            };
            Self::write_row(&mut writer, &fields)?;
        }

        Ok(())
    }

    fn write_chart<W: Write + Send>(
        &self,
        payload: &ChartPayload,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "timeframe,time,open,high,low,close,volume")?;
        }

        for timeframe in ChartTimeframe::all() {
            for candle in payload.candles(*timeframe) {
                writeln!(
                    writer,
                    "{timeframe},{},{},{},{},{},{}",
                    candle.time, candle.open, candle.high, candle.low, candle.close, candle.volume
                )?;
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

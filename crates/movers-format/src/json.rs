//! JSON output format.

use chrono::{DateTime, SecondsFormat, Utc};
use movers_chart::ChartPayload;
use movers_rank::{MoverRecord, MoverReport};
use movers_types::{DateRange, Horizon};
use serde::Serialize;
use std::io::Write;

use crate::rows::{MoverRow, SummaryRow};
use crate::{FormatError, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter, writing either arrays or newline-delimited records.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    updated: String,
    horizon: Horizon,
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<DateRange>,
    summary: SummaryRow,
    gainers: Vec<MoverRow<'a>>,
    losers: Vec<MoverRow<'a>>,
    all_stocks: Vec<MoverRow<'a>>,
}

fn rows(records: &[MoverRecord]) -> Vec<MoverRow<'_>> {
    records.iter().map(MoverRow::from).collect()
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_value<W: Write, T: Serialize + ?Sized>(
        &self,
        value: &T,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Writes a full report document.
    ///
    /// The document holds the generation time, the horizon, the window for
    /// weekly reports, the summary, both mover lists and every ranked record.
    /// The style setting is ignored; a report is always a single document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_report<W: Write + Send>(
        &self,
        report: &MoverReport,
        updated: DateTime<Utc>,
        writer: W,
    ) -> Result<(), FormatError> {
        let document = ReportDocument {
            updated: updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            horizon: report.horizon,
            window: report.window,
            summary: SummaryRow::from(&report.summary),
            gainers: rows(&report.gainers),
            losers: rows(&report.losers),
            all_stocks: rows(&report.all),
        };
        self.write_value(&document, writer)
    }
}

impl Formatter for JsonFormatter {
    fn write_movers<W: Write + Send>(
        &self,
        _horizon: Horizon,
        records: &[MoverRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => self.write_value(&rows(records), writer)?,
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, &MoverRow::from(record))?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn write_chart<W: Write + Send>(
        &self,
        payload: &ChartPayload,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_value(payload, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

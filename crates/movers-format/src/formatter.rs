//! Output format abstraction.

use movers_chart::ChartPayload;
use movers_rank::MoverRecord;
use movers_types::Horizon;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes a ranked mover list to the output, rank 1 first.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_movers<W: Write + Send>(
        &self,
        horizon: Horizon,
        records: &[MoverRecord],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes the candles of a chart payload to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_chart<W: Write + Send>(
        &self,
        payload: &ChartPayload,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;

    /// Writes one `<TICKER>.<extension>` chart file per payload into `dir`.
    ///
    /// Creates `dir` if needed and returns the written paths in payload order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a file cannot be written.
    fn write_chart_files(
        &self,
        dir: &Path,
        payloads: &[ChartPayload],
    ) -> Result<Vec<PathBuf>, FormatError> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let path = dir.join(format!("{}.{}", payload.ticker(), self.extension()));
            let mut writer = BufWriter::new(File::create(&path)?);
            self.write_chart(payload, &mut writer)?;
            writer.flush()?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::Ndjson.to_string(), "ndjson");
    }
}

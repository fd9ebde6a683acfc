//! Display utilities and output helpers for the movers CLI.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use movers_lib::prelude::*;
use movers_lib::MarketSummary;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::SourceArgs;

/// Maps `-v` occurrences to a default filter level.
pub(crate) const fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the verbosity flags.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

/// Loads the pipeline configuration, falling back to defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Invalid config file: {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Resolves the universe from `--tickers`, `--universe` or the default list.
pub(crate) fn load_universe(source: &SourceArgs) -> Result<Universe> {
    if let Some(tickers) = &source.tickers {
        return Universe::new("custom", tickers).context("Invalid --tickers list");
    }
    match &source.universe {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read universe file: {}", path.display()))?;
            Universe::from_json(&json)
                .with_context(|| format!("Invalid universe file: {}", path.display()))
        }
        None => Ok(Universe::sp500()),
    }
}

/// Parses `--as-of`, defaulting to now.
pub(crate) fn parse_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid --as-of date: {s}"))?;
            Ok(date.and_time(NaiveTime::MIN).and_utc())
        }
        None => Ok(Utc::now()),
    }
}

/// Creates a progress bar, hidden in quiet mode.
pub(crate) fn progress_bar(len: u64, quiet: bool, message: &str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Writes the three mover lists of a report as `<horizon>_{gainers,losers,all}.<ext>`.
fn write_report_lists<F: Formatter>(
    formatter: &F,
    report: &MoverReport,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;
    let lists = [
        ("gainers", &report.gainers),
        ("losers", &report.losers),
        ("all", &report.all),
    ];

    let mut written = Vec::with_capacity(lists.len());
    for (name, records) in lists {
        let path = dir.join(format!("{}_{name}.{}", report.horizon, formatter.extension()));
        let mut writer = BufWriter::new(
            File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?,
        );
        formatter.write_movers(report.horizon, records, &mut writer)?;
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

/// Writes a report document as `<horizon>.json`.
fn write_report_json(
    report: &MoverReport,
    updated: DateTime<Utc>,
    dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.horizon));
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?,
    );
    JsonFormatter::new()
        .with_pretty(true)
        .write_report(report, updated, &mut writer)?;
    writer.flush()?;
    Ok(path)
}

/// Writes a report in `format`. CSV and NDJSON produce one file per list,
/// JSON a single report document.
pub(crate) fn write_report(
    report: &MoverReport,
    format: OutputFormat,
    header: bool,
    updated: DateTime<Utc>,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    match format {
        OutputFormat::Csv => {
            write_report_lists(&CsvFormatter::new().with_header(header), report, dir)
        }
        OutputFormat::Json => Ok(vec![write_report_json(report, updated, dir)?]),
        OutputFormat::Ndjson => write_report_lists(&JsonFormatter::ndjson(), report, dir),
    }
}

/// Writes one chart file per payload in `format`.
pub(crate) fn write_charts(
    payloads: &[ChartPayload],
    format: OutputFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        OutputFormat::Csv => CsvFormatter::new().write_chart_files(dir, payloads),
        OutputFormat::Json => JsonFormatter::new().write_chart_files(dir, payloads),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_chart_files(dir, payloads),
    };
    written.with_context(|| format!("Cannot write charts to {}", dir.display()))
}

fn print_records(title: &str, records: &[MoverRecord]) {
    println!("\n{title}");
    println!(
        "{:<5} {:<8} {:>12} {:>12} {:>10} {:>10}",
        "RANK", "SYMBOL", "START", "END", "CHANGE", "CHANGE %"
    );
    println!("{}", "-".repeat(62));
    for (i, record) in records.iter().enumerate() {
        println!(
            "{:<5} {:<8} {:>12.2} {:>12.2} {:>10.2} {:>9.2}%",
            i + 1,
            record.ticker,
            record.start_price,
            record.end_price,
            record.change(),
            record.change_pct()
        );
    }
}

fn print_summary(summary: &MarketSummary) {
    println!(
        "\nTotal: {} instruments, {} up, {} down, {} unchanged, average {:+.2}%",
        summary.total, summary.gainers, summary.losers, summary.unchanged, summary.avg_change_pct
    );
}

/// Prints a report as plain tables.
pub(crate) fn print_report(report: &MoverReport) {
    if let Some(window) = report.window {
        println!("Week {} -> {}", window.start, window.end);
    }
    print_records(&format!("Top {} gainers", report.horizon), &report.gainers);
    print_records(&format!("Top {} losers", report.horizon), &report.losers);
    print_summary(&report.summary);
    if !report.skipped.is_empty() {
        println!("Skipped: {} instruments without enough data", report.skipped.len());
    }
}

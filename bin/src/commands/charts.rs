//! Charts command implementation.

use crate::display::{progress_bar, write_charts};
use anyhow::{Context, Result};
use movers_lib::prelude::*;
use std::path::PathBuf;

/// Build chart payloads for `tickers` and write one file per ticker.
pub(crate) async fn charts(
    snapshot: PathBuf,
    tickers: &[String],
    output_dir: PathBuf,
    format: OutputFormat,
    config: PipelineConfig,
    quiet: bool,
) -> Result<()> {
    let universe = Universe::new("charts", tickers).context("Invalid --tickers list")?;
    let tickers = universe.tickers().to_vec();
    let pipeline = Pipeline::new(SnapshotProvider::new(snapshot), universe, config);

    let progress = progress_bar(tickers.len() as u64, quiet, "charts")?;
    let payloads = pipeline
        .chart_payloads_with(&tickers, |payload, _| {
            progress.set_message(payload.ticker().to_string());
            progress.inc(1);
        })
        .await
        .context("Failed to build chart payloads")?;
    progress.finish_with_message(format!("{} charts", payloads.len()));

    let written = write_charts(&payloads, format, &output_dir)?;
    if !quiet {
        println!("Wrote {} chart files to {}", written.len(), output_dir.display());
    }
    Ok(())
}

//! Run command implementation.
//!
//! Ranks both horizons, charts every mover and writes the full output tree:
//! `data/` for mover tables and report documents, `charts/` for payloads.

use crate::SourceArgs;
use crate::display::{load_universe, parse_as_of, progress_bar, write_charts, write_report};
use anyhow::{Context, Result};
use movers_lib::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Run the full pipeline and write every output file under `output_dir`.
pub(crate) async fn run(
    source: &SourceArgs,
    config: PipelineConfig,
    as_of: Option<&str>,
    output_dir: PathBuf,
    quiet: bool,
) -> Result<()> {
    let generated_at = parse_as_of(as_of)?;
    let universe = load_universe(source)?;
    info!(universe = universe.name(), tickers = universe.len(), "starting run");

    let pipeline = Pipeline::new(SnapshotProvider::new(&source.snapshot), universe, config);
    let progress = progress_bar(0, quiet, "charts")?;
    let output = pipeline
        .run_with(generated_at, |payload, total| {
            progress.set_length(total as u64);
            progress.set_message(payload.ticker().to_string());
            progress.inc(1);
        })
        .await
        .context("Pipeline run failed")?;
    progress.finish_with_message(format!("{} charts", output.charts.len()));

    let data_dir = output_dir.join("data");
    for report in [&output.daily, &output.weekly] {
        write_report(report, OutputFormat::Csv, true, generated_at, &data_dir)?;
        write_report(report, OutputFormat::Json, true, generated_at, &data_dir)?;
    }

    write_charts(&output.charts, OutputFormat::Json, &output_dir.join("charts"))?;

    if !quiet {
        println!(
            "Daily: {} ranked, weekly: {} ranked, {} charts written to {}",
            output.daily.all.len(),
            output.weekly.all.len(),
            output.charts.len(),
            output_dir.display()
        );
    }
    Ok(())
}

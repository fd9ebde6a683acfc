//! Report command implementation.
//!
//! This module ranks the movers of one horizon and prints or writes them.

use crate::SourceArgs;
use crate::display::{load_universe, parse_as_of, print_report, write_report};
use anyhow::{Context, Result};
use movers_lib::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Rank one horizon and print the result or write it to `output_dir`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn report(
    source: &SourceArgs,
    mut config: PipelineConfig,
    horizon: Horizon,
    as_of: Option<&str>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
    header: bool,
    limit: Option<usize>,
) -> Result<()> {
    if let Some(limit) = limit {
        config.mover_limit = limit;
    }
    let generated_at = parse_as_of(as_of)?;
    let universe = load_universe(source)?;
    info!(universe = universe.name(), tickers = universe.len(), %horizon, "ranking");

    let pipeline = Pipeline::new(SnapshotProvider::new(&source.snapshot), universe, config);
    let report = match horizon {
        Horizon::Daily => pipeline.daily_report().await,
        Horizon::Weekly => pipeline.weekly_report(generated_at).await,
    }
    .with_context(|| format!("Failed to build the {horizon} report"))?;

    let Some(dir) = output_dir else {
        print_report(&report);
        return Ok(());
    };

    for path in write_report(&report, format, header, generated_at, &dir)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

//! movers CLI - daily and weekly market movers with chart payloads.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use movers_lib::{Horizon, OutputFormat};
use std::path::PathBuf;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "movers")]
#[command(
    about = "Rank daily and weekly market movers and build chart payloads",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Pipeline configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Where bars come from and which instruments to rank.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Snapshot directory holding d1.json, h1.json and m15.json
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Comma-separated tickers replacing the default universe
    #[arg(long, value_delimiter = ',', conflicts_with = "universe")]
    tickers: Option<Vec<String>>,

    /// Universe file (JSON: {"name": ..., "tickers": [...]})
    #[arg(long)]
    universe: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the movers of one horizon
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Ranking horizon (daily, weekly)
        #[arg(long, default_value = "daily")]
        horizon: Horizon,

        /// Reference date (YYYY-MM-DD) for the weekly window. Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Output directory. Prints a table when omitted.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format (csv, json, ndjson)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Omit the header row from CSV files
        #[arg(long)]
        no_header: bool,

        /// Maximum gainers and losers
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build chart payloads for specific tickers
    Charts {
        /// Snapshot directory holding d1.json, h1.json and m15.json
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Comma-separated tickers to chart
        #[arg(long, value_delimiter = ',', required = true)]
        tickers: Vec<String>,

        /// Output directory for <TICKER>.<format> files
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,

        /// Chart file format (json, csv, ndjson)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Rank both horizons and chart every mover
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Reference date (YYYY-MM-DD) for the weekly window. Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Output directory; receives data/ and charts/
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// List the default universe
    Universe {
        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    display::init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = display::load_config(cli.config.as_deref())?;

    match command {
        Commands::Report {
            source,
            horizon,
            as_of,
            output_dir,
            format,
            no_header,
            limit,
        } => {
            commands::report::report(
                &source,
                config,
                horizon,
                as_of.as_deref(),
                output_dir,
                format,
                !no_header,
                limit,
            )
            .await
        }
        Commands::Charts {
            snapshot,
            tickers,
            output_dir,
            format,
        } => {
            commands::charts::charts(snapshot, &tickers, output_dir, format, config, cli.quiet)
                .await
        }
        Commands::Run {
            source,
            as_of,
            output_dir,
        } => commands::run::run(&source, config, as_of.as_deref(), output_dir, cli.quiet).await,
        Commands::Universe { search } => commands::universe::list_universe(search.as_deref()),
    }
}

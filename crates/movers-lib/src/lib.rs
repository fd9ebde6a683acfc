//! Daily and weekly market movers with chart-ready candle payloads.
//!
//! This is a facade crate that re-exports functionality from the movers
//! workspace crates and adds the provider boundary and the [`Pipeline`]
//! entry point.
//!
//! # Quick Start
//!
//! ```ignore
//! use movers_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SnapshotProvider::new("snapshot");
//!     let pipeline = Pipeline::new(provider, Universe::sp500(), PipelineConfig::default());
//!
//!     let output = pipeline.run(chrono::Utc::now()).await?;
//!     for record in &output.daily.gainers {
//!         println!("{} {:+.2}%", record.ticker, record.change_pct());
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;
mod provider;

pub use config::{IntradayLookback, PipelineConfig};
pub use pipeline::{Pipeline, RunOutput};
pub use provider::{HistoryProvider, HistoryRequest, Lookback, SnapshotProvider};

// Re-export core types
pub use movers_types::*;

// Re-export the instrument universe
pub use movers_universe::{Universe, UniverseError};

// Re-export change calculation and ranking
pub use movers_rank::{
    DEFAULT_LIMIT, Direction, MarketSummary, MoverRecord, MoverReport, Ranking, VolumeMetric,
    daily_change, daily_report, rank, round2, weekly_change, weekly_report,
};

// Re-export resampling and normalization
pub use movers_aggregate::{BucketRule, Candle, MalformedCandle, Resampler, normalize, resample};

// Re-export chart assembly
pub use movers_chart::{BarCaps, ChartPayload, ChartSources, assemble, chart_tickers};

// Re-export formatters
#[cfg(feature = "format")]
pub use movers_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, MoverRow, OutputFormat, SummaryRow,
};

/// Prelude module for convenient imports.
///
/// ```
/// use movers_lib::prelude::*;
/// ```
pub mod prelude {
    pub use movers_types::{
        Bar, BarMatrix, BarSeries, ChartTimeframe, DateRange, Field, Horizon, Interval,
        MoversError, Result,
    };

    pub use movers_universe::Universe;

    pub use movers_rank::{MoverRecord, MoverReport};

    pub use movers_chart::{BarCaps, ChartPayload};

    pub use crate::{
        HistoryProvider, HistoryRequest, Lookback, Pipeline, PipelineConfig, RunOutput,
        SnapshotProvider,
    };

    #[cfg(feature = "format")]
    pub use movers_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}

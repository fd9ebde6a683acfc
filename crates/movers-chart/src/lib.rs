//! Multi-timeframe chart payload assembly for the movers pipeline.
//!
//! - [`ChartPayload`] - Candle lists for every
//!   [`ChartTimeframe`](movers_types::ChartTimeframe) of one instrument
//! - [`BarCaps`] - Per-timeframe bar limits
//! - [`assemble`] - Build a payload from daily and intraday matrices

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod caps;
mod payload;

pub use caps::BarCaps;
pub use payload::{ChartPayload, ChartSources, assemble, chart_tickers};

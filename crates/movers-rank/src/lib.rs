//! Change calculation and mover ranking for the movers pipeline.
//!
//! - [`daily_change`] / [`weekly_change`] - Per-instrument change records
//! - [`rank`] - Sort records and split them into top gainers and losers
//! - [`MoverReport`] - Ranked result of one horizon with its market summary

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod change;
mod rank;
mod report;

pub use change::{Direction, MoverRecord, VolumeMetric, daily_change, round2, weekly_change};
pub use rank::{DEFAULT_LIMIT, Ranking, rank};
pub use report::{MarketSummary, MoverReport, daily_report, weekly_report};

//! Core types for the movers pipeline.
//!
//! This crate provides the fundamental data structures used throughout movers:
//!
//! - [`BarMatrix`] - Per-instrument, per-field price matrix as supplied by a history provider
//! - [`FieldSeries`] - A single gap-free field of one instrument
//! - [`Bar`] and [`BarSeries`] - OHLCV samples of one instrument at one interval
//! - [`Interval`] and [`ChartTimeframe`] - Sampling intervals and chart resolutions
//! - [`DateRange`] - Date range, including completed trading week selection
//! - [`MoversError`] and [`InsufficientData`] - Error taxonomy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod date_range;
mod error;
mod field;
mod matrix;
mod timeframe;

pub use bar::{Bar, BarSeries};
pub use date_range::DateRange;
pub use error::{DateRangeError, InsufficiencyReason, InsufficientData, MoversError, Result};
pub use field::Field;
pub use matrix::{BarMatrix, FieldColumns, FieldSeries, Sample};
pub use timeframe::{ChartTimeframe, Horizon, Interval, TimeframeParseError};

//! OHLC resampling and candle normalization for the movers pipeline.
//!
//! This crate turns bar series into chart-ready candles:
//!
//! - [`Resampler`] - Streaming bar-to-bucket resampler
//! - [`BucketRule`] - Calendar week, calendar month or wall-clock hour buckets
//! - [`Candle`] - Chart candle with an epoch-seconds timestamp
//! - [`normalize`] - Cap, repair, sort and de-duplicate a candle list

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candle;
mod normalize;
mod resample;

pub use candle::{Candle, MalformedCandle};
pub use normalize::normalize;
pub use resample::{BucketRule, Resampler, resample};

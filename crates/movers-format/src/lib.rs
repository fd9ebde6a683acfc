//! Output formatters for the movers pipeline.
//!
//! This crate writes mover lists, reports and chart payloads:
//!
//! - [`CsvFormatter`] - Ranked CSV tables and flat candle tables
//! - [`JsonFormatter`] - JSON report documents and per-ticker chart files

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod rows;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use rows::{MoverRow, SummaryRow};

//! CLI command implementations.

pub(crate) mod charts;
pub(crate) mod report;
pub(crate) mod run;
pub(crate) mod universe;

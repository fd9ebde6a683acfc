//! Ranked mover reports and whole-universe summaries.

use movers_types::{BarMatrix, DateRange, Horizon, InsufficientData, MoversError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Direction, MoverRecord, Ranking, daily_change, rank, weekly_change};

/// Up/down/unchanged counts and mean change over every ranked record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Number of records.
    pub total: usize,
    /// Records with positive change.
    pub gainers: usize,
    /// Records with negative change.
    pub losers: usize,
    /// Records whose change rounds to zero.
    pub unchanged: usize,
    /// Mean raw percentage change, zero when there are no records.
    pub avg_change_pct: f64,
}

impl MarketSummary {
    /// Summarizes a set of records.
    #[must_use]
    pub fn from_records(records: &[MoverRecord]) -> Self {
        let total = records.len();
        let gainers = records
            .iter()
            .filter(|r| r.direction() == Direction::Up)
            .count();
        let losers = records
            .iter()
            .filter(|r| r.direction() == Direction::Down)
            .count();
        let avg_change_pct = if total == 0 {
            0.0
        } else {
            records.iter().map(MoverRecord::raw_change_pct).sum::<f64>() / total as f64
        };
        Self {
            total,
            gainers,
            losers,
            unchanged: total - gainers - losers,
            avg_change_pct,
        }
    }
}

/// Ranked movers of one horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverReport {
    /// Comparison window kind.
    pub horizon: Horizon,
    /// Calendar window of a weekly report.
    pub window: Option<DateRange>,
    /// Top gainers, largest first.
    pub gainers: Vec<MoverRecord>,
    /// Top losers, most negative first.
    pub losers: Vec<MoverRecord>,
    /// Every ranked record, descending by change.
    pub all: Vec<MoverRecord>,
    /// Summary over `all`.
    pub summary: MarketSummary,
    /// Instruments dropped for insufficient data.
    pub skipped: Vec<InsufficientData>,
}

impl MoverReport {
    /// Builds a report from per-instrument outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::EmptyUniverse`] if no outcome is a record.
    pub fn from_outcomes(
        horizon: Horizon,
        window: Option<DateRange>,
        outcomes: Vec<std::result::Result<MoverRecord, InsufficientData>>,
        limit: usize,
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(miss) => skipped.push(miss),
            }
        }

        for miss in &skipped {
            debug!(%horizon, ticker = %miss.ticker, reason = %miss.reason, "instrument skipped");
        }
        if records.is_empty() {
            return Err(MoversError::EmptyUniverse { horizon });
        }

        let summary = MarketSummary::from_records(&records);
        let Ranking {
            gainers,
            losers,
            all,
        } = rank(records, limit);
        info!(
            %horizon,
            ranked = all.len(),
            skipped = skipped.len(),
            gainers = gainers.len(),
            losers = losers.len(),
            "movers ranked"
        );

        Ok(Self {
            horizon,
            window,
            gainers,
            losers,
            all,
            summary,
            skipped,
        })
    }

    /// Returns the gainer tickers followed by the loser tickers.
    pub fn mover_tickers(&self) -> impl Iterator<Item = &str> {
        self.gainers
            .iter()
            .chain(&self.losers)
            .map(|r| r.ticker.as_str())
    }
}

/// Ranks the previous-close to latest-close change of every ticker.
///
/// # Errors
///
/// Returns [`MoversError::EmptyUniverse`] if no ticker has usable data.
pub fn daily_report(matrix: &BarMatrix, tickers: &[String], limit: usize) -> Result<MoverReport> {
    let outcomes = tickers
        .iter()
        .map(|ticker| daily_change(matrix, ticker))
        .collect();
    MoverReport::from_outcomes(Horizon::Daily, None, outcomes, limit)
}

/// Ranks the change of every ticker over a completed trading week.
///
/// # Errors
///
/// Returns [`MoversError::EmptyUniverse`] if no ticker has usable data.
pub fn weekly_report(
    matrix: &BarMatrix,
    tickers: &[String],
    window: DateRange,
    limit: usize,
) -> Result<MoverReport> {
    let outcomes = tickers
        .iter()
        .map(|ticker| weekly_change(matrix, ticker, window))
        .collect();
    MoverReport::from_outcomes(Horizon::Weekly, Some(window), outcomes, limit)
}

//! Gainer/loser ranking.

use crate::{Direction, MoverRecord};

/// Default number of records in each of the gainer and loser lists.
pub const DEFAULT_LIMIT: usize = 20;

/// Records of one horizon ordered by percentage change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    /// Up to `limit` records with positive change, largest first.
    pub gainers: Vec<MoverRecord>,
    /// Up to `limit` records with negative change, most negative first.
    pub losers: Vec<MoverRecord>,
    /// Every record, descending by raw percentage change.
    pub all: Vec<MoverRecord>,
}

/// Sorts records by raw percentage change and splits off the top movers.
///
/// The sort is stable, so records with equal change keep their input order.
/// Records whose presented change is zero are in neither list.
#[must_use]
pub fn rank(records: Vec<MoverRecord>, limit: usize) -> Ranking {
    let mut all = records;
    all.sort_by(|a, b| b.raw_change_pct().total_cmp(&a.raw_change_pct()));

    let gainers = all
        .iter()
        .take_while(|r| r.direction() == Direction::Up)
        .take(limit)
        .cloned()
        .collect();

    // The loser suffix read back to front is already most-negative first.
    let losers = all
        .iter()
        .rev()
        .take_while(|r| r.direction() == Direction::Down)
        .take(limit)
        .cloned()
        .collect();

    Ranking {
        gainers,
        losers,
        all,
    }
}

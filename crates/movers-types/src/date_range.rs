//! Date ranges and completed trading week selection.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::DateRangeError;

/// A range of dates, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the range of `days` calendar days ending at `end`.
    ///
    /// A zero-day request yields the single day `end`. A request reaching
    /// past the earliest representable date starts at [`NaiveDate::MIN`].
    #[must_use]
    pub fn last_days(end: NaiveDate, days: u32) -> Self {
        let back = TimeDelta::days(i64::from(days.saturating_sub(1)));
        Self {
            start: end.checked_sub_signed(back).unwrap_or(NaiveDate::MIN),
            end,
        }
    }

    /// Returns the Monday-to-Friday week whose trading is complete as of `today`.
    ///
    /// On Saturday and Sunday this is the week that just ended; on any
    /// weekday it is the previous calendar week.
    #[must_use]
    pub fn completed_trading_week(today: NaiveDate) -> Self {
        let days_from_monday = i64::from(today.weekday().num_days_from_monday());
        let this_monday = today - TimeDelta::days(days_from_monday);
        let monday = match today.weekday() {
            Weekday::Sat | Weekday::Sun => this_monday,
            _ => this_monday - TimeDelta::days(7),
        };
        Self {
            start: monday,
            end: monday + TimeDelta::days(4),
        }
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(range.total_days(), 31);
        assert!(range.contains(date(2024, 1, 15)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_date_range_invalid() {
        assert!(DateRange::new(date(2024, 1, 31), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_last_days() {
        let range = DateRange::last_days(date(2024, 3, 8), 5);
        assert_eq!(range.start, date(2024, 3, 4));
        assert_eq!(range.total_days(), 5);
        assert_eq!(DateRange::last_days(date(2024, 3, 8), 0).total_days(), 1);
    }

    #[test]
    fn test_last_days_clamps_to_min() {
        let range = DateRange::last_days(date(2024, 3, 8), u32::MAX);
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, date(2024, 3, 8));
    }

    #[test]
    fn test_completed_week_on_weekend() {
        // 2024-03-09 is a Saturday, 2024-03-10 a Sunday.
        for today in [date(2024, 3, 9), date(2024, 3, 10)] {
            let week = DateRange::completed_trading_week(today);
            assert_eq!(week.start, date(2024, 3, 4));
            assert_eq!(week.end, date(2024, 3, 8));
        }
    }

    #[test]
    fn test_completed_week_on_weekday() {
        // Monday through Friday of 2024-03-11 all select the week of 2024-03-04.
        for day in 11..=15 {
            let week = DateRange::completed_trading_week(date(2024, 3, day));
            assert_eq!(week.start, date(2024, 3, 4));
            assert_eq!(week.end, date(2024, 3, 8));
            assert_eq!(week.start.weekday(), Weekday::Mon);
            assert_eq!(week.end.weekday(), Weekday::Fri);
        }
    }

    #[test]
    fn test_completed_week_across_year() {
        let week = DateRange::completed_trading_week(date(2025, 1, 1));
        assert_eq!(week.start, date(2024, 12, 23));
        assert_eq!(week.end, date(2024, 12, 27));
    }
}

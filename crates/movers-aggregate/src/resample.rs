//! Streaming bar-to-bucket resampling.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use movers_types::{Bar, BarSeries, ChartTimeframe};

/// How bars are grouped into buckets.
///
/// Boundaries are purely wall-clock (UTC); exchange sessions are not modelled,
/// so gaps just give thinner buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketRule {
    /// Calendar week ending Friday, labelled with that Friday.
    WeekEndingFriday,
    /// Calendar month, labelled with its last day.
    Month,
    /// Fixed N-hour buckets aligned to midnight, labelled with their start.
    Hours(u32),
}

impl BucketRule {
    /// Returns the rule that derives a chart timeframe, if it is resampled.
    #[must_use]
    pub const fn for_timeframe(timeframe: ChartTimeframe) -> Option<Self> {
        match timeframe {
            ChartTimeframe::Hour2 => Some(Self::Hours(2)),
            ChartTimeframe::Hour3 => Some(Self::Hours(3)),
            ChartTimeframe::Week => Some(Self::WeekEndingFriday),
            ChartTimeframe::Month => Some(Self::Month),
            ChartTimeframe::Minute15 | ChartTimeframe::Hour1 | ChartTimeframe::Day => None,
        }
    }

    /// Calculates the bucket label for a timestamp.
    #[must_use]
    pub fn bucket_for(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::WeekEndingFriday => week_ending_friday(timestamp),
            Self::Month => month_end(timestamp),
            Self::Hours(hours) => truncate_to_hours(timestamp, *hours),
        }
    }
}

/// Streaming resampler.
///
/// Bars must arrive in ascending timestamp order.
#[derive(Debug)]
pub struct Resampler {
    rule: BucketRule,
    current: Option<BucketBuilder>,
}

impl Resampler {
    /// Creates a new resampler for the given rule.
    #[must_use]
    pub const fn new(rule: BucketRule) -> Self {
        Self {
            rule,
            current: None,
        }
    }

    /// Processes a bar, potentially emitting a completed bucket.
    ///
    /// Returns `Some(bar)` when this bar starts a new bucket and the previous
    /// one resolved all four prices; a bucket missing any of them is dropped.
    pub fn push(&mut self, bar: &Bar) -> Option<Bar> {
        let bucket = self.rule.bucket_for(bar.timestamp);

        match self.current.take() {
            Some(mut builder) if builder.timestamp == bucket => {
                builder.update(bar);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(BucketBuilder::new(bucket, bar));
                builder.finish()
            }
            None => {
                self.current = Some(BucketBuilder::new(bucket, bar));
                None
            }
        }
    }

    /// Finishes resampling, returning the last bucket if it is complete.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        self.current.and_then(BucketBuilder::finish)
    }
}

/// Resamples a whole series into the buckets of `rule`.
#[must_use]
pub fn resample(series: &BarSeries, rule: BucketRule) -> BarSeries {
    let mut resampler = Resampler::new(rule);
    let mut bars: Vec<Bar> = series.iter().filter_map(|bar| resampler.push(bar)).collect();
    bars.extend(resampler.finish());
    BarSeries::new(series.ticker(), series.interval(), bars)
}

/// Accumulates one bucket.
///
/// Each price field is aggregated on its own, skipping non-finite values:
/// first open, highest high, lowest low, last close. Volume is summed.
#[derive(Debug)]
struct BucketBuilder {
    timestamp: DateTime<Utc>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: f64,
}

impl BucketBuilder {
    fn new(timestamp: DateTime<Utc>, bar: &Bar) -> Self {
        let mut builder = Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: 0.0,
        };
        builder.update(bar);
        builder
    }

    fn update(&mut self, bar: &Bar) {
        if self.open.is_none() {
            self.open = finite(bar.open);
        }
        if let Some(high) = finite(bar.high) {
            self.high = Some(self.high.map_or(high, |h| h.max(high)));
        }
        if let Some(low) = finite(bar.low) {
            self.low = Some(self.low.map_or(low, |l| l.min(low)));
        }
        if let Some(close) = finite(bar.close) {
            self.close = Some(close);
        }
        if let Some(volume) = finite(bar.volume) {
            self.volume += volume;
        }
    }

    fn finish(self) -> Option<Bar> {
        Some(Bar::new(
            self.timestamp,
            self.open?,
            self.high?,
            self.low?,
            self.close?,
            self.volume,
        ))
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Returns midnight of the Friday on or after the timestamp's date.
fn week_ending_friday(dt: DateTime<Utc>) -> DateTime<Utc> {
    let weekday = i64::from(dt.weekday().num_days_from_monday());
    let to_friday = (4 - weekday).rem_euclid(7);
    midnight(dt.date_naive() + TimeDelta::days(to_friday))
}

/// Returns midnight of the last day of the timestamp's month.
fn month_end(dt: DateTime<Utc>) -> DateTime<Utc> {
    let date = dt.date_naive();
    let remaining = days_in_month(date.year(), date.month()) - date.day();
    midnight(date + TimeDelta::days(i64::from(remaining)))
}

const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Truncates a timestamp to the start of an N-hour boundary within its day.
fn truncate_to_hours(dt: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
    let interval = interval.clamp(1, 24);
    let time = dt.time();
    let into_bucket = TimeDelta::seconds(i64::from(
        (time.hour() % interval) * 3600 + time.minute() * 60 + time.second(),
    )) + TimeDelta::nanoseconds(i64::from(time.nanosecond()));
    dt - into_bucket
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use movers_types::Interval;
    use proptest::prelude::*;

    fn day(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    fn hour(d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, min, 0).unwrap()
    }

    fn bar(ts: DateTime<Utc>, o: f64, h: f64, l: f64, c: f64) -> Bar {
        Bar::new(ts, o, h, l, c, 100.0)
    }

    fn series(interval: Interval, bars: Vec<Bar>) -> BarSeries {
        BarSeries::new("TEST", interval, bars)
    }

    #[test]
    fn test_weekly_bucket_example() {
        // Monday 2024-03-04 and Tuesday 2024-03-05.
        let daily = series(
            Interval::Day1,
            vec![
                bar(day(3, 4), 10.0, 12.0, 9.0, 11.0),
                bar(day(3, 5), 11.0, 13.0, 10.0, 12.0),
            ],
        );
        let weekly = resample(&daily, BucketRule::WeekEndingFriday);

        assert_eq!(weekly.len(), 1);
        let week = weekly.bars()[0];
        assert_eq!(week.timestamp, day(3, 8));
        assert_eq!((week.open, week.high, week.low, week.close), (10.0, 13.0, 9.0, 12.0));
        assert_eq!(week.volume, 200.0);
    }

    #[test]
    fn test_week_label_is_friday() {
        assert_eq!(week_ending_friday(day(3, 8)), day(3, 8));
        assert_eq!(week_ending_friday(day(3, 9)), day(3, 15));
        assert_eq!(week_ending_friday(day(3, 10)), day(3, 15));
        assert_eq!(week_ending_friday(day(3, 11)).weekday(), Weekday::Fri);
    }

    #[test]
    fn test_month_buckets() {
        let daily = series(
            Interval::Day1,
            vec![
                bar(day(1, 30), 1.0, 2.0, 0.5, 1.5),
                bar(day(1, 31), 1.5, 3.0, 1.0, 2.5),
                bar(day(2, 1), 2.5, 2.6, 2.0, 2.1),
                bar(day(2, 29), 2.1, 2.2, 1.9, 2.0),
            ],
        );
        let monthly = resample(&daily, BucketRule::Month);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly.bars()[0].timestamp, day(1, 31));
        assert_eq!(monthly.bars()[0].high, 3.0);
        assert_eq!(monthly.bars()[1].timestamp, day(2, 29));
        assert_eq!(monthly.bars()[1].open, 2.5);
        assert_eq!(monthly.bars()[1].close, 2.0);
    }

    #[test]
    fn test_hour_buckets_are_wall_clock() {
        let hourly = series(
            Interval::Hour1,
            vec![
                bar(hour(4, 13, 30), 1.0, 1.5, 0.9, 1.2),
                bar(hour(4, 14, 30), 1.2, 1.3, 1.1, 1.25),
                bar(hour(4, 15, 30), 1.25, 1.4, 1.0, 1.1),
                // Overnight gap: next bar lands in a fresh bucket.
                bar(hour(5, 13, 30), 2.0, 2.1, 1.9, 2.05),
            ],
        );
        let two_hour = resample(&hourly, BucketRule::Hours(2));
        let starts: Vec<_> = two_hour.iter().map(|b| b.timestamp).collect();
        assert_eq!(starts, [hour(4, 12, 0), hour(4, 14, 0), hour(5, 12, 0)]);
        assert_eq!(two_hour.bars()[1].close, 1.1);

        let three_hour = resample(&hourly, BucketRule::Hours(3));
        assert_eq!(three_hour.bars()[0].timestamp, hour(4, 12, 0));
        assert_eq!(three_hour.bars()[1].timestamp, hour(4, 15, 0));
    }

    #[test]
    fn test_partial_bucket_dropped() {
        let daily = series(
            Interval::Day1,
            vec![
                bar(day(3, 4), 10.0, 12.0, 9.0, 11.0),
                // Next week holds only a high.
                bar(day(3, 11), f64::NAN, 14.0, f64::NAN, f64::NAN),
            ],
        );
        let weekly = resample(&daily, BucketRule::WeekEndingFriday);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly.bars()[0].timestamp, day(3, 8));
    }

    #[test]
    fn test_fields_aggregate_independently() {
        let daily = series(
            Interval::Day1,
            vec![
                bar(day(3, 4), f64::NAN, 12.0, 9.0, 11.0),
                bar(day(3, 5), 11.0, 13.0, 10.0, f64::NAN),
            ],
        );
        let week = resample(&daily, BucketRule::WeekEndingFriday).bars()[0];
        assert_eq!((week.open, week.high, week.low, week.close), (11.0, 13.0, 9.0, 11.0));
    }

    #[test]
    fn test_bucket_combines_fields_from_disjoint_bars() {
        // Neither bar is complete on its own.
        let daily = series(
            Interval::Day1,
            vec![
                Bar::new(day(3, 4), 10.0, 12.0, f64::NAN, f64::NAN, 40.0),
                Bar::new(day(3, 6), f64::NAN, f64::NAN, 9.0, 11.0, f64::NAN),
            ],
        );
        let weekly = resample(&daily, BucketRule::WeekEndingFriday);

        assert_eq!(weekly.len(), 1);
        let week = weekly.bars()[0];
        assert_eq!(week.timestamp, day(3, 8));
        assert_eq!((week.open, week.high, week.low, week.close), (10.0, 12.0, 9.0, 11.0));
        assert_eq!(week.volume, 40.0);
    }

    #[test]
    fn test_resample_is_idempotent_on_aligned_buckets() {
        let weekly = series(
            Interval::Day1,
            vec![
                bar(day(3, 8), 10.0, 12.0, 9.0, 11.0),
                bar(day(3, 15), 11.0, 13.0, 10.0, 12.0),
            ],
        );
        let again = resample(&weekly, BucketRule::WeekEndingFriday);
        assert_eq!(again.bars(), weekly.bars());
    }

    #[test]
    fn test_streaming_matches_batch() {
        let mut resampler = Resampler::new(BucketRule::Hours(2));
        assert!(resampler.push(&bar(hour(4, 10, 0), 1.0, 1.0, 1.0, 1.0)).is_none());
        assert!(resampler.push(&bar(hour(4, 11, 0), 2.0, 2.0, 2.0, 2.0)).is_none());
        let done = resampler.push(&bar(hour(4, 12, 0), 3.0, 3.0, 3.0, 3.0)).unwrap();
        assert_eq!((done.open, done.close), (1.0, 2.0));
        assert_eq!(resampler.finish().unwrap().open, 3.0);
    }

    #[test]
    fn test_for_timeframe() {
        assert_eq!(
            BucketRule::for_timeframe(ChartTimeframe::Hour3),
            Some(BucketRule::Hours(3))
        );
        assert_eq!(BucketRule::for_timeframe(ChartTimeframe::Day), None);
    }

    proptest! {
        #[test]
        fn prop_bucket_high_bounds_inputs(
            raw in prop::collection::vec(
                (1.0f64..100.0, 0.0f64..5.0, 0.0f64..5.0, 1.0f64..100.0),
                1..60,
            ),
        ) {
            let bars: Vec<Bar> = raw
                .iter()
                .enumerate()
                .map(|(i, (o, up, down, c))| {
                    let ts = day(1, 1) + TimeDelta::days(i as i64);
                    bar(ts, *o, o.max(*c) + up, o.min(*c) - down, *c)
                })
                .collect();
            let daily = series(Interval::Day1, bars.clone());
            let weekly = resample(&daily, BucketRule::WeekEndingFriday);

            for week in weekly.iter() {
                let members: Vec<&Bar> = bars
                    .iter()
                    .filter(|b| week_ending_friday(b.timestamp) == week.timestamp)
                    .collect();
                prop_assert!(!members.is_empty());
                for member in &members {
                    prop_assert!(week.high >= member.high);
                    prop_assert!(week.low <= member.low);
                }
                prop_assert!(week.high <= week.repaired().high);
                prop_assert_eq!(week.open, members[0].open);
                prop_assert_eq!(week.close, members[members.len() - 1].close);
            }
        }
    }
}

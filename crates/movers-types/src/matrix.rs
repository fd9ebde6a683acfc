//! In-memory bar store and single-field extraction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{Bar, BarSeries, DateRange, Field, Interval, MoversError};

/// Per-instrument, per-field matrix of provider values indexed by timestamp.
///
/// Absent values are `None`, never zero. Columns may be shorter than the
/// index; the missing tail counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarMatrix {
    interval: Interval,
    index: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, FieldColumns>,
}

/// The five field columns of one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldColumns {
    /// Opening prices.
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    /// Highest prices.
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    /// Lowest prices.
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    /// Closing prices.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Traded volumes.
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl FieldColumns {
    /// Returns the column for a field.
    #[must_use]
    pub fn column(&self, field: Field) -> &[Option<f64>] {
        match field {
            Field::Open => &self.open,
            Field::High => &self.high,
            Field::Low => &self.low,
            Field::Close => &self.close,
            Field::Volume => &self.volume,
        }
    }

    fn column_mut(&mut self, field: Field) -> &mut Vec<Option<f64>> {
        match field {
            Field::Open => &mut self.open,
            Field::High => &mut self.high,
            Field::Low => &mut self.low,
            Field::Close => &mut self.close,
            Field::Volume => &mut self.volume,
        }
    }

    /// Returns the value at an index position, treating non-finite values as absent.
    #[must_use]
    pub fn value(&self, field: Field, position: usize) -> Option<f64> {
        self.column(field)
            .get(position)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    fn resize(&mut self, len: usize) {
        for field in Field::all() {
            self.column_mut(*field).resize(len, None);
        }
    }

    fn pick(&self, positions: &[usize]) -> Self {
        let mut picked = Self::default();
        for field in Field::all() {
            let source = self.column(*field);
            *picked.column_mut(*field) = positions
                .iter()
                .map(|&i| source.get(i).copied().flatten())
                .collect();
        }
        picked
    }
}

impl BarMatrix {
    /// Creates a matrix with the given timestamp index and no instruments.
    #[must_use]
    pub const fn new(interval: Interval, index: Vec<DateTime<Utc>>) -> Self {
        Self {
            interval,
            index,
            columns: BTreeMap::new(),
        }
    }

    /// Inserts one field column of an instrument.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::Shape`] if the column length differs from the index length.
    pub fn insert_column(
        &mut self,
        ticker: &str,
        field: Field,
        values: Vec<Option<f64>>,
    ) -> Result<(), MoversError> {
        if values.len() != self.index.len() {
            return Err(MoversError::Shape {
                ticker: ticker.to_string(),
                field: field.to_string(),
                expected: self.index.len(),
                found: values.len(),
            });
        }
        let len = self.index.len();
        let columns = self.columns.entry(ticker.to_string()).or_default();
        columns.resize(len);
        *columns.column_mut(field) = values;
        Ok(())
    }

    /// Inserts the bars of one instrument, extending the index as needed.
    ///
    /// `NaN` fields are stored as absent.
    pub fn insert_bars(&mut self, ticker: &str, bars: &[Bar]) {
        let mut positions: HashMap<DateTime<Utc>, usize> = self
            .index
            .iter()
            .enumerate()
            .map(|(i, ts)| (*ts, i))
            .collect();

        let slots: Vec<usize> = bars
            .iter()
            .map(|bar| {
                *positions.entry(bar.timestamp).or_insert_with(|| {
                    self.index.push(bar.timestamp);
                    self.index.len() - 1
                })
            })
            .collect();

        let len = self.index.len();
        for columns in self.columns.values_mut() {
            columns.resize(len);
        }
        let columns = self.columns.entry(ticker.to_string()).or_default();
        columns.resize(len);

        let present = |v: f64| (!v.is_nan()).then_some(v);
        for (bar, slot) in bars.iter().zip(slots) {
            columns.open[slot] = present(bar.open);
            columns.high[slot] = present(bar.high);
            columns.low[slot] = present(bar.low);
            columns.close[slot] = present(bar.close);
            columns.volume[slot] = present(bar.volume);
        }
    }

    /// Returns the sampling interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the timestamp index in provider order.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Returns the instrument identifiers present in the matrix.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns true if the matrix holds no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.values().all(|columns| {
            Field::all()
                .iter()
                .all(|field| (0..self.index.len()).all(|i| columns.value(*field, i).is_none()))
        })
    }

    /// Returns the date of the latest index timestamp.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.index.iter().max().map(DateTime::date_naive)
    }

    /// Returns one field of one instrument as an ascending, gap-free sequence.
    ///
    /// Absent and non-finite samples are dropped, never filled. An instrument the
    /// matrix does not carry yields an empty sequence.
    #[must_use]
    pub fn field_series(&self, ticker: &str, field: Field) -> FieldSeries {
        let Some(columns) = self.columns.get(ticker) else {
            return FieldSeries::default();
        };
        let samples = self
            .index
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                columns
                    .value(field, i)
                    .map(|value| Sample::new(*ts, value))
            })
            .collect();
        FieldSeries::from_samples(samples)
    }

    /// Returns the bars of one instrument.
    ///
    /// Timestamps where every price field is absent are dropped. A partially
    /// absent row is kept with `NaN` in the missing price fields; absent
    /// volume becomes zero.
    #[must_use]
    pub fn bar_series(&self, ticker: &str) -> BarSeries {
        let Some(columns) = self.columns.get(ticker) else {
            return BarSeries::empty(ticker, self.interval);
        };
        let bars = self
            .index
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let open = columns.value(Field::Open, i);
                let high = columns.value(Field::High, i);
                let low = columns.value(Field::Low, i);
                let close = columns.value(Field::Close, i);
                if open.is_none() && high.is_none() && low.is_none() && close.is_none() {
                    return None;
                }
                Some(Bar::new(
                    *ts,
                    open.unwrap_or(f64::NAN),
                    high.unwrap_or(f64::NAN),
                    low.unwrap_or(f64::NAN),
                    close.unwrap_or(f64::NAN),
                    columns.value(Field::Volume, i).unwrap_or(0.0),
                ))
            })
            .collect();
        BarSeries::new(ticker, self.interval, bars)
    }

    /// Returns a copy holding only the given instruments.
    #[must_use]
    pub fn restrict(&self, tickers: &[String]) -> Self {
        let columns = tickers
            .iter()
            .filter_map(|t| self.columns.get(t).map(|c| (t.clone(), c.clone())))
            .collect();
        Self {
            interval: self.interval,
            index: self.index.clone(),
            columns,
        }
    }

    /// Returns a copy holding only the index rows whose date falls in `range`.
    #[must_use]
    pub fn within(&self, range: DateRange) -> Self {
        let positions: Vec<usize> = self
            .index
            .iter()
            .enumerate()
            .filter(|(_, ts)| range.contains(ts.date_naive()))
            .map(|(i, _)| i)
            .collect();
        Self {
            interval: self.interval,
            index: positions.iter().map(|&i| self.index[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(ticker, columns)| (ticker.clone(), columns.pick(&positions)))
                .collect(),
        }
    }
}

/// One present value of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sampling instant.
    pub timestamp: DateTime<Utc>,
    /// Field value.
    pub value: f64,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A single field of one instrument, ascending by timestamp with no gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSeries {
    samples: Vec<Sample>,
}

impl FieldSeries {
    /// Creates a series from samples, sorting them by timestamp.
    ///
    /// When two samples share a timestamp the later one in input order wins.
    #[must_use]
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        let mut unique: Vec<Sample> = Vec::with_capacity(samples.len());
        for sample in samples {
            match unique.last_mut() {
                Some(last) if last.timestamp == sample.timestamp => *last = sample,
                _ => unique.push(sample),
            }
        }
        Self { samples: unique }
    }

    /// Returns the samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the earliest sample.
    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Returns the latest sample.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Returns the value at a timestamp, if present.
    #[must_use]
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.samples
            .binary_search_by_key(&timestamp, |s| s.timestamp)
            .ok()
            .map(|i| self.samples[i].value)
    }

    /// Returns the samples whose date falls within `range`.
    #[must_use]
    pub fn within(&self, range: DateRange) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .filter(|s| range.contains(s.timestamp.date_naive()))
                .copied()
                .collect(),
        }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}

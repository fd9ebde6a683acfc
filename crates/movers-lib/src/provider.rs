//! History provider boundary and the on-disk snapshot provider.

use async_trait::async_trait;
use movers_types::{BarMatrix, DateRange, Interval, MoversError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How far back a history request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// Calendar days ending at the latest available date.
    Days(u32),
    /// An explicit date range.
    Range(DateRange),
}

/// A request for the bars of several instruments at one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Instruments to fetch.
    pub tickers: Vec<String>,
    /// Sampling interval.
    pub interval: Interval,
    /// Lookback of the request.
    pub lookback: Lookback,
}

impl HistoryRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(tickers: &[String], interval: Interval, lookback: Lookback) -> Self {
        Self {
            tickers: tickers.to_vec(),
            interval,
            lookback,
        }
    }
}

/// Source of historical bars.
///
/// A provider answers one request with one matrix. Instruments it has no
/// data for are simply absent; an entirely empty matrix means the request
/// returned nothing.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetches the bars of a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    async fn history(&self, request: &HistoryRequest) -> Result<BarMatrix>;
}

/// Reads serialized matrices from a directory.
///
/// The directory holds one `<interval>.json` file per interval (`d1.json`,
/// `h1.json`, `m15.json`). A missing file answers with an empty matrix.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    dir: PathBuf,
}

impl SnapshotProvider {
    /// Creates a provider over a snapshot directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file holding an interval's matrix.
    #[must_use]
    pub fn path_for(&self, interval: Interval) -> PathBuf {
        self.dir.join(format!("{}.json", interval.as_str()))
    }

    /// Writes a matrix into the snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn store(&self, matrix: &BarMatrix) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(matrix.interval());
        tokio::fs::write(&path, serde_json::to_vec(matrix)?).await?;
        Ok(path)
    }
}

#[async_trait]
impl HistoryProvider for SnapshotProvider {
    async fn history(&self, request: &HistoryRequest) -> Result<BarMatrix> {
        let path = self.path_for(request.interval);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "snapshot file missing");
                return Ok(BarMatrix::new(request.interval, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let matrix: BarMatrix = serde_json::from_str(&contents)?;
        if matrix.interval() != request.interval {
            return Err(MoversError::Provider(format!(
                "{} holds {} bars, expected {}",
                path.display(),
                matrix.interval(),
                request.interval
            )));
        }

        let matrix = matrix.restrict(&request.tickers);
        let range = match request.lookback {
            Lookback::Range(range) => Some(range),
            Lookback::Days(days) => matrix
                .latest_date()
                .map(|latest| DateRange::last_days(latest, days)),
        };
        let matrix = match range {
            Some(range) => matrix.within(range),
            None => matrix,
        };
        debug!(
            interval = %request.interval,
            tickers = matrix.tickers().count(),
            rows = matrix.index().len(),
            "snapshot loaded"
        );
        Ok(matrix)
    }
}

//! Instrument universe for the movers pipeline.
//!
//! A [`Universe`] is an explicit list of instrument identifiers handed to the
//! pipeline for one run. The embedded S&P 500 list is available through
//! [`Universe::sp500`]; tests and callers can build their own.
//!
//! # Example
//!
//! ```
//! use movers_universe::Universe;
//!
//! let universe = Universe::new("tech", ["aapl", "MSFT", "AAPL"]).unwrap();
//! assert_eq!(universe.tickers(), ["AAPL", "MSFT"]);
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/movers/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// The S&P 500 constituent list embedded at compile time.
const SP500_JSON: &str = include_str!("../data/sp500.json");

/// Errors that can occur while building a universe.
#[derive(Error, Debug)]
pub enum UniverseError {
    /// The universe has no instruments.
    #[error("Universe '{0}' has no instruments")]
    Empty(String),

    /// A ticker symbol contains characters no exchange symbol uses.
    #[error("Invalid ticker symbol: '{0}'")]
    InvalidSymbol(String),

    /// The universe file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered, duplicate-free list of instrument identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUniverse")]
pub struct Universe {
    name: String,
    tickers: Vec<String>,
}

#[derive(Deserialize)]
struct RawUniverse {
    name: String,
    tickers: Vec<String>,
}

impl TryFrom<RawUniverse> for Universe {
    type Error = UniverseError;

    fn try_from(raw: RawUniverse) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.tickers)
    }
}

impl Universe {
    /// Creates a universe from ticker symbols.
    ///
    /// Symbols are trimmed and upper-cased; repeats keep their first position.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol is invalid or no symbols are given.
    pub fn new<I, S>(name: impl Into<String>, tickers: I) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for ticker in tickers {
            let symbol = normalize(ticker.as_ref())?;
            if seen.insert(symbol.clone()) {
                normalized.push(symbol);
            }
        }
        if normalized.is_empty() {
            return Err(UniverseError::Empty(name));
        }
        Ok(Self {
            name,
            tickers: normalized,
        })
    }

    /// Returns the embedded S&P 500 universe.
    #[must_use]
    pub fn sp500() -> Self {
        Self::from_json(SP500_JSON).expect("Invalid sp500.json")
    }

    /// Parses a universe from `{"name": .., "tickers": [..]}` JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tickers are invalid.
    pub fn from_json(json: &str) -> Result<Self, UniverseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the universe name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tickers in universe order.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Returns the number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Returns true if the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Searches tickers by substring (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&str> {
        let pattern = pattern.to_uppercase();
        self.tickers
            .iter()
            .filter(|t| t.contains(&pattern))
            .map(String::as_str)
            .collect()
    }
}

fn normalize(ticker: &str) -> Result<String, UniverseError> {
    let symbol = ticker.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '^');
    if valid {
        Ok(symbol)
    } else {
        Err(UniverseError::InvalidSymbol(ticker.to_string()))
    }
}

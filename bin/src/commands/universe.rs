//! Universe command implementation.

use anyhow::Result;
use movers_lib::prelude::*;

/// List the default universe with an optional search pattern.
pub(crate) fn list_universe(search: Option<&str>) -> Result<()> {
    let universe = Universe::sp500();
    let tickers: Vec<&str> = match search {
        Some(pattern) => universe.search(pattern),
        None => universe.tickers().iter().map(String::as_str).collect(),
    };

    if tickers.is_empty() {
        println!("No tickers found.");
        return Ok(());
    }

    for row in tickers.chunks(10) {
        println!("{}", row.join("  "));
    }

    println!("\nTotal: {} of {} tickers in {}", tickers.len(), universe.len(), universe.name());
    Ok(())
}

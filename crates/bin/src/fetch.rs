//! Fundamentals fetching with progress reporting.

use gics_data::{FundamentalsRecord, FundamentalsSource, Statement};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Fetch `statement` for each symbol.
///
/// A single symbol fails loudly. Several symbols are fetched behind a
/// progress bar; failures are logged and skipped, and only a run where
/// nothing was fetched is an error.
pub(crate) async fn fundamentals(
    source: &dyn FundamentalsSource,
    statement: Statement,
    symbols: &[String],
) -> Result<Vec<FundamentalsRecord>, Box<dyn std::error::Error>> {
    if let [symbol] = symbols {
        return Ok(vec![source.fetch(statement, symbol).await?]);
    }

    let pb = ProgressBar::new(symbols.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );

    let mut records = Vec::with_capacity(symbols.len());
    let mut failed = Vec::new();

    for symbol in symbols {
        pb.set_message(format!("Fetching {}", symbol));
        match source.fetch(statement, symbol).await {
            Ok(record) => records.push(record),
            Err(e) => {
                pb.suspend(|| warn!(%symbol, %statement, error = %e, "fetch failed"));
                failed.push(symbol.as_str());
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Fetched {}/{}", records.len(), symbols.len()));

    if records.is_empty() {
        return Err(format!("no {} data fetched for {}", statement, failed.join(", ")).into());
    }
    Ok(records)
}

//! Saved FMP responses served from a JSON file.
//!
//! The file maps symbol to endpoint to payload:
//!
//! ```json
//! { "AAPL": { "profile": [ ... ], "income-statement": [ ... ] } }
//! ```

use super::{FundamentalsRecord, FundamentalsSource, Statement, normalize_symbol};
use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

type Fixtures = HashMap<String, HashMap<String, serde_json::Value>>;

/// Offline stand-in for [`FmpClient`](super::FmpClient).
#[derive(Debug, Clone, Default)]
pub struct DemoSource {
    fixtures: Fixtures,
}

impl DemoSource {
    /// Load fixtures from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let fixtures: Fixtures = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), symbols = fixtures.len(), "loaded demo fixtures");
        Ok(Self { fixtures })
    }

    /// Build from an in-memory JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(Self {
            fixtures: serde_json::from_value(value)?,
        })
    }

    /// Symbols with saved responses, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.fixtures.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

#[async_trait]
impl FundamentalsSource for DemoSource {
    fn name(&self) -> &str {
        "demo fixtures"
    }

    async fn fetch(&self, statement: Statement, symbol: &str) -> Result<FundamentalsRecord> {
        let symbol = normalize_symbol(symbol)?;

        let payload = self
            .fixtures
            .get(&symbol)
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.clone(),
                reason: "no demo fixture for symbol".to_string(),
            })?
            .get(statement.endpoint())
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.clone(),
                reason: format!("no demo fixture for {}", statement.endpoint()),
            })?
            .clone();

        Ok(FundamentalsRecord {
            symbol,
            statement,
            fetched_at: Utc::now(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use serde_json::json;

    fn source() -> DemoSource {
        DemoSource::from_value(json!({
            "XOM": {
                "profile": [{"symbol": "XOM", "companyName": "Exxon Mobil Corporation"}]
            },
            "CVX": {
                "profile": [{"symbol": "CVX"}],
                "income-statement": [{"symbol": "CVX", "revenue": 1}]
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_fixture() {
        let record = source().fetch(Statement::Overview, "xom").await.unwrap();
        assert_eq!(record.symbol, "XOM");
        assert_eq!(record.payload[0]["companyName"], "Exxon Mobil Corporation");
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let err = source()
            .fetch(Statement::BalanceSheet, "XOM")
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::MissingData { ref reason, .. } if reason.contains("balance-sheet-statement")));
    }

    #[tokio::test]
    async fn test_missing_symbol() {
        let err = source().fetch(Statement::Overview, "AAPL").await.unwrap_err();
        assert!(matches!(err, DataError::MissingData { .. }));
    }

    #[tokio::test]
    async fn test_batch_skips_failures() {
        let symbols = vec!["XOM".to_string(), "AAPL".to_string(), "CVX".to_string()];
        let records = source()
            .fetch_batch(Statement::Overview, &symbols)
            .await
            .unwrap();
        let fetched: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(fetched, ["XOM", "CVX"]);
    }

    #[tokio::test]
    async fn test_bundled_fixtures() {
        let source = DemoSource::from_path(DataConfig::bundled().fixtures_path).unwrap();
        assert!(source.symbols().contains(&"AAPL".to_string()));
        for statement in Statement::ALL {
            assert!(source.fetch(statement, "AAPL").await.is_ok(), "{statement}");
        }
    }
}

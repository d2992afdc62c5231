//! Fundamentals from Financial Modeling Prep.
//!
//! Two sources implement [`FundamentalsSource`]: [`FmpClient`] calls the
//! live API and [`DemoSource`] serves saved responses from a JSON file, for
//! running without an API key. Payloads are returned as the provider sent
//! them.

pub mod client;
pub mod demo;

pub use client::FmpClient;
pub use demo::DemoSource;

use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Fundamentals dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statement {
    /// Company profile / overview
    Overview,
    /// Balance sheet
    BalanceSheet,
    /// Income statement
    IncomeStatement,
    /// Cash-flow statement
    CashFlow,
}

impl Statement {
    /// All datasets.
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
    ];

    /// FMP endpoint name, also the key used in demo fixtures.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Overview => "profile",
            Self::BalanceSheet => "balance-sheet-statement",
            Self::IncomeStatement => "income-statement",
            Self::CashFlow => "cash-flow-statement",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

impl FromStr for Statement {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" | "profile" => Ok(Self::Overview),
            "balance-sheet" | "balance-sheet-statement" => Ok(Self::BalanceSheet),
            "income" | "income-statement" => Ok(Self::IncomeStatement),
            "cash-flow" | "cash-flow-statement" => Ok(Self::CashFlow),
            other => Err(DataError::Config(format!(
                "unknown statement {other:?} (expected overview, balance-sheet, income or cash-flow)"
            ))),
        }
    }
}

/// One dataset for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRecord {
    /// Upper-cased symbol
    pub symbol: String,
    /// Dataset
    pub statement: Statement,
    /// When the payload was obtained
    pub fetched_at: DateTime<Utc>,
    /// Provider response body
    pub payload: serde_json::Value,
}

/// A place fundamentals can be fetched from.
#[async_trait]
pub trait FundamentalsSource: Send + Sync + fmt::Debug {
    /// Human-readable name of the source.
    fn name(&self) -> &str;

    /// Fetch one dataset for one symbol.
    async fn fetch(&self, statement: Statement, symbol: &str) -> Result<FundamentalsRecord>;

    /// Fetch one dataset for several symbols, in order.
    ///
    /// Failures are logged and skipped.
    async fn fetch_batch(
        &self,
        statement: Statement,
        symbols: &[String],
    ) -> Result<Vec<FundamentalsRecord>> {
        let mut records = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            match self.fetch(statement, symbol).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(source = self.name(), %symbol, %statement, error = %e, "fetch failed");
                    continue;
                }
            }
        }

        Ok(records)
    }
}

/// Trim and upper-case a symbol.
pub(crate) fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    Ok(symbol.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("overview", Statement::Overview)]
    #[case("balance-sheet", Statement::BalanceSheet)]
    #[case("Income", Statement::IncomeStatement)]
    #[case("cash-flow-statement", Statement::CashFlow)]
    fn test_parse_statement(#[case] input: &str, #[case] expected: Statement) {
        assert_eq!(input.parse::<Statement>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_statement() {
        assert!("ratios".parse::<Statement>().is_err());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Statement::Overview.endpoint(), "profile");
        assert_eq!(Statement::CashFlow.to_string(), "cash-flow-statement");
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" brk.b ").unwrap(), "BRK.B");
        assert!(matches!(
            normalize_symbol("  "),
            Err(DataError::InvalidSymbol(_))
        ));
    }
}

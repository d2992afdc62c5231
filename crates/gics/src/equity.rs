//! An equity with its classification.

use gics_taxonomy::Classification;
use serde::Serialize;

/// A listed equity.
///
/// Holds its [`Classification`] by value; fundamentals are fetched
/// separately and combined by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equity {
    /// Ticker symbol
    pub symbol: String,
    /// Common name, when one is registered
    pub common_name: Option<String>,
    /// GICS classification
    pub classification: Classification,
}

impl Equity {
    /// Create a new equity.
    pub fn new(
        symbol: impl Into<String>,
        common_name: Option<String>,
        classification: Classification,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            common_name,
            classification,
        }
    }

    /// Common name if known, otherwise the symbol.
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.symbol)
    }
}

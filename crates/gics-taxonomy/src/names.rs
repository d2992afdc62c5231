//! Symbol to common-name lookup.

use crate::error::{Result, TaxonomyError};
use std::collections::HashMap;

/// Read-only map from ticker symbol to the name people actually use.
///
/// Supplied at construction; an unknown symbol is reported, never asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonNames {
    names: HashMap<String, String>,
}

impl CommonNames {
    /// Build from `(symbol, name)` pairs. Later pairs win.
    pub fn new<I, S, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(s, n)| (s.into(), n.into()))
                .collect(),
        }
    }

    /// Name for a symbol, if known.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    /// Name for a symbol.
    ///
    /// # Errors
    ///
    /// [`TaxonomyError::UnknownSymbol`] if there is no entry.
    pub fn require(&self, symbol: &str) -> Result<&str> {
        self.get(symbol)
            .ok_or_else(|| TaxonomyError::UnknownSymbol(symbol.to_owned()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copy of this lookup with extra entries added.
    pub fn with<I, S, N>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        let mut names = self.names.clone();
        names.extend(pairs.into_iter().map(|(s, n)| (s.into(), n.into())));
        Self { names }
    }

    /// Names for well-known large caps.
    pub fn builtin() -> Self {
        Self::new([
            ("MMM", "3M"),
            ("HON", "Honeywell"),
            ("GE", "GE"),
            ("TEVA", "Teva"),
            ("MDT", "Medtronic"),
            ("F", "Ford"),
            ("ABT", "Abbott"),
            ("BA", "Boeing"),
            ("EADSY", "Airbus"),
            ("SLB", "Schlumberger"),
            ("DAL", "Delta"),
            ("UAL", "United Airlines"),
            ("XOM", "Exxon"),
            ("RTX", "Raytheon"),
            ("LHX", "L3Harris"),
            ("GD", "General Dynamics"),
            ("WBA", "Walgreens"),
            ("VTRS", "Viatris"),
            ("AAPL", "Apple"),
            ("BDX", "BD"),
            ("CVS", "CVS"),
            ("HAL", "Halliburton"),
            ("MSFT", "Microsoft"),
            ("NVDA", "Nvidia"),
            ("PFE", "Pfizer"),
            ("SHEL", "Shell"),
            ("LUV", "Southwest Airlines"),
        ])
    }
}

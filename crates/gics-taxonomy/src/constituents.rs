//! Index constituents and peer lookup.

use crate::classify::Classification;
use crate::error::TaxonomyError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Hierarchy level at which peers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HierarchyLevel {
    /// Same sector
    #[display("sector")]
    Sector,
    /// Same industry
    #[display("industry")]
    Industry,
    /// Same sub-industry
    #[display("sub-industry")]
    SubIndustry,
}

impl HierarchyLevel {
    /// All levels, broadest first.
    pub const ALL: [Self; 3] = [Self::Sector, Self::Industry, Self::SubIndustry];

    /// The classification's value at this level.
    pub fn value_of(self, classification: &Classification) -> Option<&str> {
        match self {
            Self::Sector => Some(classification.sector()).filter(|s| !s.is_empty()),
            Self::Industry => classification.industry(),
            Self::SubIndustry => classification.sub_industry(),
        }
    }
}

impl FromStr for HierarchyLevel {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sector" => Ok(Self::Sector),
            "industry" => Ok(Self::Industry),
            "sub-industry" | "subindustry" | "sub_industry" => Ok(Self::SubIndustry),
            _ => Err(TaxonomyError::UnknownLevel(s.to_owned())),
        }
    }
}

/// An index member with its full GICS path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    /// Ticker symbol
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// Sector
    #[serde(rename = "Sector")]
    pub sector: String,
    /// Industry group
    #[serde(rename = "Industry Group")]
    pub industry_group: String,
    /// Industry
    #[serde(rename = "Industry")]
    pub industry: String,
    /// Sub-industry
    #[serde(rename = "Sub-Industry")]
    pub sub_industry: String,
}

impl Constituent {
    /// Create a new constituent. Surrounding whitespace is trimmed.
    pub fn new(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        industry_group: impl Into<String>,
        industry: impl Into<String>,
        sub_industry: impl Into<String>,
    ) -> Self {
        let trimmed = |v: String| v.trim().to_owned();
        Self {
            symbol: trimmed(symbol.into()),
            sector: trimmed(sector.into()),
            industry_group: trimmed(industry_group.into()),
            industry: trimmed(industry.into()),
            sub_industry: trimmed(sub_industry.into()),
        }
    }

    /// Classification of this constituent. Blank levels become absent.
    pub fn classification(&self) -> Classification {
        let level = |v: &str| Some(v.trim().to_owned()).filter(|v| !v.is_empty());
        Classification::unchecked(
            self.sector.trim().to_owned(),
            level(&self.industry),
            level(&self.sub_industry),
        )
    }

    /// Header of the first empty field, if any.
    pub fn blank_column(&self) -> Option<&'static str> {
        [
            ("Symbol", &self.symbol),
            ("Sector", &self.sector),
            ("Industry Group", &self.industry_group),
            ("Industry", &self.industry),
            ("Sub-Industry", &self.sub_industry),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(column, _)| column)
    }

    /// Level value as [`classification`](Self::classification) sees it.
    fn value_at(&self, level: HierarchyLevel) -> &str {
        match level {
            HierarchyLevel::Sector => &self.sector,
            HierarchyLevel::Industry => &self.industry,
            HierarchyLevel::SubIndustry => &self.sub_industry,
        }
        .trim()
    }
}

/// Symbol to classification map, in insertion order.
///
/// A symbol that appears twice keeps its first position and its last
/// classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstituentIndex {
    constituents: Vec<Constituent>,
    positions: HashMap<String, usize>,
}

impl ConstituentIndex {
    /// Build an index from constituents.
    pub fn new(constituents: impl IntoIterator<Item = Constituent>) -> Self {
        let mut index = Self::default();
        for constituent in constituents {
            match index.positions.get(&constituent.symbol) {
                Some(&i) => index.constituents[i] = constituent,
                None => {
                    index
                        .positions
                        .insert(constituent.symbol.clone(), index.constituents.len());
                    index.constituents.push(constituent);
                }
            }
        }
        index
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    /// Iterate constituents in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constituent> {
        self.constituents.iter()
    }

    /// All symbols in insertion order.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Check if a symbol is in the index.
    pub fn contains(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    /// Look up a constituent.
    pub fn get(&self, symbol: &str) -> Option<&Constituent> {
        self.positions.get(symbol).map(|&i| &self.constituents[i])
    }

    /// Classification of a symbol.
    pub fn classification(&self, symbol: &str) -> Option<Classification> {
        self.get(symbol).map(Constituent::classification)
    }

    /// Number of constituents per sector.
    pub fn sector_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for constituent in &self.constituents {
            *counts.entry(constituent.sector.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Peers of a member at a level, excluding the member itself.
    ///
    /// Returns `None` if the symbol is not in the index.
    pub fn peers_of(&self, symbol: &str, level: HierarchyLevel) -> Option<Vec<String>> {
        let classification = self.classification(symbol)?;
        Some(
            peers_at(level, &classification, self)
                .into_iter()
                .filter(|peer| peer != symbol)
                .collect(),
        )
    }
}

impl FromIterator<Constituent> for ConstituentIndex {
    fn from_iter<T: IntoIterator<Item = Constituent>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a ConstituentIndex {
    type Item = &'a Constituent;
    type IntoIter = std::slice::Iter<'a, Constituent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Symbols sharing the classification's value at `level`.
///
/// Matching is exact string equality. When the classification has no value
/// at the requested level the result is empty. Symbols come back in index
/// order; sort them if you need another order.
pub fn peers_at(
    level: HierarchyLevel,
    classification: &Classification,
    index: &ConstituentIndex,
) -> Vec<String> {
    let Some(wanted) = level.value_of(classification) else {
        return Vec::new();
    };

    index
        .iter()
        .filter(|c| c.value_at(level) == wanted)
        .map(|c| c.symbol.clone())
        .collect()
}

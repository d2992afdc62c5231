//! Hierarchy loading.
//!
//! GICS reference tables are usually published in a ragged layout: a parent
//! value (sector, industry group, industry) is written once and left blank on
//! the rows of its children that follow it.
//!
//! ```text
//! Sector,Industry Group,Industry,Sub-Industry
//! Energy,Energy,Energy Equipment & Services,Oil & Gas Drilling
//! ,,,Oil & Gas Equipment & Services
//! ,,"Oil, Gas & Consumable Fuels",Integrated Oil & Gas
//! ```
//!
//! [`load`] reconstructs the full path of every row by carrying the last
//! non-blank value of each column forward, then hands the rows to
//! [`TaxonomyTable`] which builds the lookup indexes and checks nesting.

use crate::error::{MalformedHierarchy, Result};
use crate::table::TaxonomyTable;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the four GICS hierarchy columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum HierarchyColumn {
    /// Level 1
    #[display("Sector")]
    Sector,
    /// Level 2
    #[display("Industry Group")]
    IndustryGroup,
    /// Level 3
    #[display("Industry")]
    Industry,
    /// Level 4
    #[display("Sub-Industry")]
    SubIndustry,
}

impl HierarchyColumn {
    /// All columns, outermost first.
    pub const ALL: [Self; 4] = [
        Self::Sector,
        Self::IndustryGroup,
        Self::Industry,
        Self::SubIndustry,
    ];

    /// Position of the column in a row.
    pub const fn index(&self) -> usize {
        match self {
            Self::Sector => 0,
            Self::IndustryGroup => 1,
            Self::Industry => 2,
            Self::SubIndustry => 3,
        }
    }
}

/// A source row in which any cell may be blank.
///
/// Blank means "same as the nearest row above that has a value in this
/// column". Empty and whitespace-only strings count as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTaxonomyRow {
    /// Sector cell
    #[serde(rename = "Sector", default)]
    pub sector: Option<String>,
    /// Industry group cell
    #[serde(rename = "Industry Group", default)]
    pub industry_group: Option<String>,
    /// Industry cell
    #[serde(rename = "Industry", default)]
    pub industry: Option<String>,
    /// Sub-industry cell
    #[serde(rename = "Sub-Industry", default)]
    pub sub_industry: Option<String>,
}

impl RawTaxonomyRow {
    /// Create a raw row from four optional cells.
    pub fn new(
        sector: Option<&str>,
        industry_group: Option<&str>,
        industry: Option<&str>,
        sub_industry: Option<&str>,
    ) -> Self {
        Self {
            sector: sector.map(str::to_owned),
            industry_group: industry_group.map(str::to_owned),
            industry: industry.map(str::to_owned),
            sub_industry: sub_industry.map(str::to_owned),
        }
    }

    /// Cells in column order, trimmed, with blanks normalised to `None`.
    fn into_cells(self) -> [Option<String>; 4] {
        [
            self.sector,
            self.industry_group,
            self.industry,
            self.sub_industry,
        ]
        .map(|cell| {
            cell.map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        })
    }
}

/// A fully resolved classification path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyRow {
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

impl TaxonomyRow {
    /// Create a resolved row.
    pub fn new(
        sector: impl Into<String>,
        industry_group: impl Into<String>,
        industry: impl Into<String>,
        sub_industry: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            industry_group: industry_group.into(),
            industry: industry.into(),
            sub_industry: sub_industry.into(),
        }
    }

    /// Value of a single column.
    pub fn get(&self, column: HierarchyColumn) -> &str {
        match column {
            HierarchyColumn::Sector => &self.sector,
            HierarchyColumn::IndustryGroup => &self.industry_group,
            HierarchyColumn::Industry => &self.industry,
            HierarchyColumn::SubIndustry => &self.sub_industry,
        }
    }
}

/// Fill forward a ragged hierarchy and build the lookup table.
///
/// Rows are processed in the order given. For every column the last
/// non-blank value is carried; a blank cell takes the carried value and a
/// non-blank cell replaces it.
///
/// # Errors
///
/// Returns [`MalformedHierarchy`] when the input is empty, when a blank cell
/// has nothing to inherit (including any blank cell in the first row), or
/// when the resolved rows break strict nesting. Nothing is returned on error,
/// so a partially built table can never escape.
pub fn load<I>(raw_rows: I) -> Result<TaxonomyTable>
where
    I: IntoIterator<Item = RawTaxonomyRow>,
{
    let mut carried: [Option<String>; 4] = Default::default();
    let mut rows = Vec::new();

    for (row, raw) in raw_rows.into_iter().enumerate() {
        let mut resolved: [String; 4] = Default::default();

        for (column, cell) in HierarchyColumn::ALL.into_iter().zip(raw.into_cells()) {
            let slot = &mut carried[column.index()];
            if cell.is_some() {
                *slot = cell;
            }
            resolved[column.index()] = slot
                .clone()
                .ok_or(MalformedHierarchy::Unresolved { row, column })?;
        }

        let [sector, industry_group, industry, sub_industry] = resolved;
        rows.push(TaxonomyRow {
            sector,
            industry_group,
            industry,
            sub_industry,
        });
    }

    if rows.is_empty() {
        return Err(MalformedHierarchy::Empty.into());
    }

    let table = TaxonomyTable::from_rows(rows)?;
    debug!(
        rows = table.len(),
        sectors = table.sectors().len(),
        industries = table.industries().len(),
        sub_industries = table.sub_industries().len(),
        "loaded GICS hierarchy"
    );
    Ok(table)
}

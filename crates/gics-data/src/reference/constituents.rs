//! Constituent membership CSV (Symbol, Sector, Industry Group, Industry,
//! Sub-Industry).

use crate::error::{DataError, Result};
use gics_taxonomy::{Constituent, ConstituentIndex, TaxonomyTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read constituents in file order.
///
/// Columns are matched by header name and may come in any order. Every cell
/// must be filled; the first blank one fails the read with
/// [`DataError::BlankCell`].
pub fn read_constituents<R: Read>(reader: R) -> Result<ConstituentIndex> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut constituents = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let constituent: Constituent = record.deserialize(Some(&headers))?;
        if let Some(column) = constituent.blank_column() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(DataError::BlankCell { line, column });
        }
        constituents.push(constituent);
    }
    Ok(ConstituentIndex::new(constituents))
}

/// Read a constituents file.
pub fn load_constituents(path: impl AsRef<Path>) -> Result<ConstituentIndex> {
    let path = path.as_ref();
    let index = read_constituents(File::open(path)?)?;
    debug!(path = %path.display(), constituents = index.len(), "read constituents");
    Ok(index)
}

/// Symbols whose classification does not fit the hierarchy.
///
/// Each constituent is checked strictly: every level must be filled, exist
/// and sit under the level above it.
pub fn validate_constituents(index: &ConstituentIndex, table: &TaxonomyTable) -> Vec<String> {
    index
        .iter()
        .filter_map(|c| {
            if let Some(column) = c.blank_column() {
                warn!(symbol = %c.symbol, column, "constituent has a blank level");
                return Some(c.symbol.clone());
            }

            let industry = Some(c.industry.as_str());
            let sub_industry = Some(c.sub_industry.as_str());
            match table.classify_strict(&c.sector, industry, sub_industry) {
                Ok(_) => None,
                Err(e) => {
                    warn!(symbol = %c.symbol, error = %e, "constituent does not match hierarchy");
                    Some(c.symbol.clone())
                }
            }
        })
        .collect()
}

//! Ragged GICS hierarchy CSV.
//!
//! Columns are taken by position (Sector, Industry Group, Industry,
//! Sub-Industry) and the header row is skipped, so files with slightly
//! different header spellings still load. Short rows are allowed; missing
//! trailing cells count as blank.

use crate::error::Result;
use gics_taxonomy::{RawTaxonomyRow, TaxonomyTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read raw hierarchy rows without filling them.
pub fn read_hierarchy<R: Read>(reader: R) -> Result<Vec<RawTaxonomyRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cell = |i: usize| record.get(i).map(str::to_owned);
        rows.push(RawTaxonomyRow {
            sector: cell(0),
            industry_group: cell(1),
            industry: cell(2),
            sub_industry: cell(3),
        });
    }
    Ok(rows)
}

/// Read a hierarchy file and build the populated table.
///
/// # Errors
///
/// IO and CSV errors, or [`DataError::Taxonomy`](crate::DataError::Taxonomy)
/// when the rows cannot be filled forward.
pub fn load_hierarchy(path: impl AsRef<Path>) -> Result<TaxonomyTable> {
    let path = path.as_ref();
    let rows = read_hierarchy(File::open(path)?)?;
    debug!(path = %path.display(), rows = rows.len(), "read hierarchy source");
    Ok(gics_taxonomy::load(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use gics_taxonomy::{HierarchyColumn, MalformedHierarchy, TaxonomyError};

    const RAGGED: &str = "\
Sector,Industry Group,Industry,Sub-Industry
Energy,Energy,Energy Equipment & Services,Oil & Gas Drilling
,,,Oil & Gas Equipment & Services
,,\"Oil, Gas & Consumable Fuels\",Integrated Oil & Gas
";

    #[test]
    fn test_blank_cells_are_absent() {
        let rows = read_hierarchy(RAGGED.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sector.as_deref(), Some("Energy"));
        assert!(rows[1].sector.as_deref().unwrap_or_default().is_empty());
        assert_eq!(
            rows[2].industry.as_deref(),
            Some("Oil, Gas & Consumable Fuels")
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let rows = read_hierarchy("a,b,c,d\nEnergy,Energy,Oil,Drilling\n,,\n".as_bytes()).unwrap();
        assert_eq!(rows[1].sub_industry, None);
    }

    #[test]
    fn test_loaded_rows_are_filled() {
        let table = gics_taxonomy::load(read_hierarchy(RAGGED.as_bytes()).unwrap()).unwrap();
        assert_eq!(table.rows()[2].sector, "Energy");
        assert_eq!(table.rows()[1].industry, "Energy Equipment & Services");
    }

    #[test]
    fn test_missing_seed_value() {
        let csv = "Sector,Industry Group,Industry,Sub-Industry\n,Energy,Oil,Drilling\n";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gics.csv");
        std::fs::write(&path, csv).unwrap();

        let err = load_hierarchy(&path).unwrap_err();
        assert!(matches!(
            err,
            DataError::Taxonomy(TaxonomyError::MalformedHierarchy(
                MalformedHierarchy::Unresolved {
                    row: 0,
                    column: HierarchyColumn::Sector
                }
            ))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_hierarchy("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}

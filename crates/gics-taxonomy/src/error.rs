//! Error types for taxonomy loading and classification.

use crate::hierarchy::HierarchyColumn;
use thiserror::Error;

/// Result type for taxonomy operations.
pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Errors that can occur while loading the hierarchy or classifying against it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    /// The raw hierarchy could not be turned into a fully populated table.
    #[error("Malformed hierarchy: {0}")]
    MalformedHierarchy(#[from] MalformedHierarchy),

    /// Sector is not part of the loaded taxonomy
    #[error("Invalid GICS sector {value:?} (expected one of: {})", .sample.join(", "))]
    InvalidSector {
        /// Rejected value
        value: String,
        /// Sample of valid sectors
        sample: Vec<String>,
    },

    /// Industry is not part of the loaded taxonomy
    #[error("Invalid GICS industry {value:?} (expected one of: {}, ...)", .sample.join(", "))]
    InvalidIndustry {
        /// Rejected value
        value: String,
        /// Sample of valid industries
        sample: Vec<String>,
    },

    /// Sub-industry is not part of the loaded taxonomy
    #[error("Invalid GICS sub-industry {value:?} (expected one of: {}, ...)", .sample.join(", "))]
    InvalidSubIndustry {
        /// Rejected value
        value: String,
        /// Sample of valid sub-industries
        sample: Vec<String>,
    },

    /// A child value does not sit under the parent the caller supplied.
    ///
    /// Only produced by strict classification.
    #[error("{child:?} belongs to {expected:?}, not {given:?}")]
    InconsistentClassification {
        /// Child value (industry or sub-industry)
        child: String,
        /// Parent recorded in the taxonomy
        expected: String,
        /// Parent supplied by the caller
        given: String,
    },

    /// Symbol has no entry in a lookup table
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Unrecognised hierarchy level name
    #[error("Unknown hierarchy level {0:?} (expected sector, industry or sub-industry)")]
    UnknownLevel(String),
}

/// Reasons a raw hierarchy is rejected by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedHierarchy {
    /// No rows at all.
    #[error("hierarchy source has no rows")]
    Empty,

    /// A blank cell with nothing above it to inherit from.
    #[error("row {row}: {column} is blank and no earlier row provides a value")]
    Unresolved {
        /// Zero-based row index in the source
        row: usize,
        /// Offending column
        column: HierarchyColumn,
    },

    /// A value appears under two different parents.
    #[error("row {row}: {column} {value:?} is already under {existing:?}, found under {found:?}")]
    ConflictingParent {
        /// Zero-based row index in the source
        row: usize,
        /// Column of the child value
        column: HierarchyColumn,
        /// Child value
        value: String,
        /// Parent seen first
        existing: String,
        /// Parent on this row
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sector_lists_sample() {
        let err = TaxonomyError::InvalidSector {
            value: "Crypto".to_string(),
            sample: vec!["Energy".to_string(), "Materials".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Crypto\""));
        assert!(msg.contains("Energy, Materials"));
    }

    #[test]
    fn test_unresolved_names_row_and_column() {
        let err: TaxonomyError = MalformedHierarchy::Unresolved {
            row: 0,
            column: HierarchyColumn::IndustryGroup,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Malformed hierarchy: row 0: Industry Group is blank and no earlier row provides a value"
        );
    }
}

//! Error types for data operations.

use gics_taxonomy::TaxonomyError;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Hierarchy or classification error from the taxonomy
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered but reported a failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required CSV cell was empty
    #[error("Blank {column} cell on line {line}")]
    BlankCell {
        /// 1-based line in the file
        line: u64,
        /// Column header
        column: &'static str,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

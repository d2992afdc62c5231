#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod constituents;
pub mod error;
pub mod hierarchy;
pub mod names;
pub mod sector;
pub mod shared;
pub mod table;

pub use classify::Classification;
pub use constituents::{Constituent, ConstituentIndex, HierarchyLevel, peers_at};
pub use error::{MalformedHierarchy, Result, TaxonomyError};
pub use hierarchy::{HierarchyColumn, RawTaxonomyRow, TaxonomyRow, load};
pub use names::CommonNames;
pub use sector::GicsSector;
pub use shared::SharedTaxonomy;
pub use table::TaxonomyTable;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

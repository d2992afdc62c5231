#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod equity;

// Re-export main types from sub-crates
pub use gics_data as data;
pub use gics_taxonomy as taxonomy;

pub use context::Gics;
pub use equity::Equity;
pub use gics_taxonomy::{
    Classification, CommonNames, Constituent, ConstituentIndex, GicsSector, HierarchyLevel,
    TaxonomyError, TaxonomyTable, peers_at,
};

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

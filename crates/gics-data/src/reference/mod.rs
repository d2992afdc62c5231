//! CSV reference tables: the GICS hierarchy and index constituents.

pub mod constituents;
pub mod hierarchy;

pub use constituents::{load_constituents, read_constituents, validate_constituents};
pub use hierarchy::{load_hierarchy, read_hierarchy};

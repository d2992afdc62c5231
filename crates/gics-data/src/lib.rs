#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fmp;
pub mod reference;

pub use config::{ApiKeyConfig, DataConfig};
pub use error::{DataError, Result};
pub use fmp::{DemoSource, FmpClient, FundamentalsRecord, FundamentalsSource, Statement};
pub use reference::{load_constituents, load_hierarchy, validate_constituents};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

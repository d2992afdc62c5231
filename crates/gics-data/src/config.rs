//! Paths to reference data and API key resolution.

use crate::error::{DataError, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the hierarchy CSV path.
pub const HIERARCHY_ENV: &str = "GICS_HIERARCHY";
/// Environment variable overriding the constituents CSV path.
pub const CONSTITUENTS_ENV: &str = "GICS_CONSTITUENTS";
/// Environment variable overriding the demo fixtures path.
pub const FIXTURES_ENV: &str = "GICS_FIXTURES";
/// Environment variable holding an FMP API key.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// Entry looked up in key files when no other name is given.
pub const DEFAULT_KEY_NAME: &str = "financial_modeling_prep_dcl";

/// Values with this prefix are key names, not keys.
const KEY_NAME_PREFIX: &str = "financial_modeling_prep";

const HIERARCHY_FILE: &str = "gics_structure.csv";
const CONSTITUENTS_FILE: &str = "sp500_constituents.csv";
const FIXTURES_FILE: &str = "demo_fundamentals.json";

/// Locations of the reference tables and demo fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Ragged GICS hierarchy CSV
    pub hierarchy_path: PathBuf,
    /// Constituent membership CSV
    pub constituents_path: PathBuf,
    /// Demo fundamentals JSON
    pub fixtures_path: PathBuf,
}

impl DataConfig {
    /// Standard file names inside `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            hierarchy_path: dir.join(HIERARCHY_FILE),
            constituents_path: dir.join(CONSTITUENTS_FILE),
            fixtures_path: dir.join(FIXTURES_FILE),
        }
    }

    /// The `data/` directory shipped with the workspace.
    pub fn bundled() -> Self {
        Self::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data"))
    }

    /// Bundled paths, each overridable from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::bundled();
        if let Some(path) = env::var_os(HIERARCHY_ENV) {
            config.hierarchy_path = path.into();
        }
        if let Some(path) = env::var_os(CONSTITUENTS_ENV) {
            config.constituents_path = path.into();
        }
        if let Some(path) = env::var_os(FIXTURES_ENV) {
            config.fixtures_path = path.into();
        }
        config
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Where to find the FMP API key.
///
/// Resolution order:
/// 1. an explicit key;
/// 2. the `FMP_API_KEY` environment variable;
/// 3. the key name looked up in JSON key files (`{"name": "key", ...}`):
///    an explicit file, else `./api_ops/apikeys.json`, else
///    `<config dir>/gics/apikeys.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyConfig {
    key: Option<String>,
    key_name: String,
    key_file: Option<PathBuf>,
}

impl ApiKeyConfig {
    /// Look up the default key name in the default places.
    pub fn new() -> Self {
        Self {
            key: None,
            key_name: DEFAULT_KEY_NAME.to_string(),
            key_file: None,
        }
    }

    /// Use a key, or a key name if the value starts with
    /// `financial_modeling_prep`.
    pub fn with_key(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.to_lowercase().starts_with(KEY_NAME_PREFIX) {
            self.key_name = value;
        } else {
            self.key = Some(value);
        }
        self
    }

    /// Read keys from this file instead of the default locations.
    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// Resolve the key.
    ///
    /// # Errors
    ///
    /// [`DataError::Config`] when no source yields a key, or
    /// [`DataError::Serialization`] when a key file is not valid JSON.
    pub fn resolve(&self) -> Result<String> {
        self.resolve_from(env::var(API_KEY_ENV).ok(), &self.key_files())
    }

    fn key_files(&self) -> Vec<PathBuf> {
        if let Some(file) = &self.key_file {
            return vec![file.clone()];
        }
        let mut files = vec![PathBuf::from("api_ops").join("apikeys.json")];
        if let Some(dir) = dirs::config_dir() {
            files.push(dir.join("gics").join("apikeys.json"));
        }
        files
    }

    fn resolve_from(&self, env_key: Option<String>, files: &[PathBuf]) -> Result<String> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            debug!("using API key from {API_KEY_ENV}");
            return Ok(key);
        }

        for file in files {
            if !file.is_file() {
                continue;
            }
            let keys: HashMap<String, String> =
                serde_json::from_str(&std::fs::read_to_string(file)?)?;
            if let Some(key) = keys.get(&self.key_name) {
                debug!(file = %file.display(), name = %self.key_name, "using API key from key file");
                return Ok(key.clone());
            }
        }

        let tried: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
        Err(DataError::Config(format!(
            "no API key: set {API_KEY_ENV} or add {:?} to one of [{}]",
            self.key_name,
            tried.join(", ")
        )))
    }
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_file(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("apikeys.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_bundled_paths() {
        let config = DataConfig::bundled();
        assert!(config.hierarchy_path.ends_with("gics_structure.csv"));
        assert!(config.constituents_path.ends_with("sp500_constituents.csv"));
        assert!(config.hierarchy_path.is_file());
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = ApiKeyConfig::new().with_key("abc123");
        assert_eq!(
            config.resolve_from(Some("from-env".into()), &[]).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_env_before_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = key_file(dir.path(), r#"{"financial_modeling_prep_dcl": "from-file"}"#);
        let config = ApiKeyConfig::new();
        assert_eq!(
            config.resolve_from(Some("from-env".into()), &[file]).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_key_name_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let file = key_file(
            dir.path(),
            r#"{"financial_modeling_prep_dcl": "default", "financial_modeling_prep_alt": "alt"}"#,
        );

        let default = ApiKeyConfig::new();
        assert_eq!(default.resolve_from(None, &[file.clone()]).unwrap(), "default");

        let named = ApiKeyConfig::new().with_key("financial_modeling_prep_alt");
        assert_eq!(named.resolve_from(None, &[file]).unwrap(), "alt");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = key_file(dir.path(), r#"{"financial_modeling_prep_dcl": "k"}"#);
        let missing = dir.path().join("nope.json");
        assert_eq!(
            ApiKeyConfig::new()
                .resolve_from(None, &[missing, file])
                .unwrap(),
            "k"
        );
    }

    #[test]
    fn test_unresolved_key() {
        let err = ApiKeyConfig::new().resolve_from(None, &[]).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_bad_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = key_file(dir.path(), "not json");
        let err = ApiKeyConfig::new().resolve_from(None, &[file]).unwrap_err();
        assert!(matches!(err, DataError::Serialization(_)));
    }
}

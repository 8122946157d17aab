//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default tracing filter when `MEMEM_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "memem=info";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Abort the process on an invariant violation instead of reporting it
    pub panic_on_invariant_violation: bool,
    /// Number of tables the catalog is pre-sized for
    pub initial_table_capacity: usize,
    /// Number of rows each new table is pre-sized for
    pub initial_row_capacity: usize,
    /// Tracing filter directive used by the binaries
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            panic_on_invariant_violation: false,
            initial_table_capacity: 16,
            initial_row_capacity: 0,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether invariant violations abort
    pub fn panic_on_invariant_violation(mut self, enabled: bool) -> Self {
        self.panic_on_invariant_violation = enabled;
        self
    }

    /// Set the catalog pre-allocation
    pub fn initial_table_capacity(mut self, tables: usize) -> Self {
        self.initial_table_capacity = tables;
        self
    }

    /// Set the per-table row pre-allocation
    pub fn initial_row_capacity(mut self, rows: usize) -> Self {
        self.initial_row_capacity = rows;
        self
    }

    /// Set the tracing filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse a config from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .panic_on_invariant_violation(true)
            .initial_row_capacity(128)
            .log_filter("memem=trace");

        assert!(config.panic_on_invariant_violation);
        assert_eq!(config.initial_row_capacity, 128);
        assert_eq!(config.initial_table_capacity, 16);
        assert_eq!(config.log_filter, "memem=trace");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "initial_table_capacity": 2 }"#).unwrap();
        assert_eq!(config.initial_table_capacity, 2);
        assert!(!config.panic_on_invariant_violation);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);

        let result = EngineConfig::from_json("{ not json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "panic_on_invariant_violation": true }}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(config.panic_on_invariant_violation);

        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}

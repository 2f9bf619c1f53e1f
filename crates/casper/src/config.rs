//! Store configuration.
//!
//! Configuration is plain data, usually loaded from YAML:
//!
//! ```yaml
//! scan: snapshot
//! create_missing: false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a scan observes concurrent writes to its collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanConsistency {
    /// Re-read the collection per record. Concurrent additions and removals
    /// may or may not be observed, but every record seen is complete.
    #[default]
    Weak,
    /// Copy the collection once at scan start and scan the copy.
    Snapshot,
}

/// Configuration for a [`Database`](crate::Database).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Scan consistency for queries.
    pub scan: ScanConsistency,
    /// Whether repository handles create their collection on first use.
    pub create_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            scan: ScanConsistency::Weak,
            create_missing: true,
        }
    }
}

impl DatabaseConfig {
    /// Parses a configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Sets the scan consistency.
    pub fn with_scan(mut self, scan: ScanConsistency) -> Self {
        self.scan = scan;
        self
    }

    /// Sets whether repositories create missing collections.
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }
}

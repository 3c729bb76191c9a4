//! Record set configuration
//!
//! Loaded from a TOML file with a `[record_set]` table:
//!
//! ```toml
//! [record_set]
//! max_size = 500
//! ```
//!
//! `COVSET_MAX_SIZE` overrides the file value when set.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`RecordSetConfig::max_size`]
pub const MAX_SIZE_ENV: &str = "COVSET_MAX_SIZE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSetConfig {
    /// Maximum number of records kept (0 = unbounded)
    pub max_size: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    record_set: RecordSetConfig,
}

impl RecordSetConfig {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        Ok(file.record_set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Apply `COVSET_MAX_SIZE` if present
    pub fn apply_env(self) -> Result<Self> {
        match std::env::var(MAX_SIZE_ENV) {
            Ok(raw) => self.with_max_size_override(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_max_size_override(mut self, raw: &str) -> Result<Self> {
        self.max_size = raw.trim().parse().map_err(|_| {
            Error::Config(format!("{} must be a non-negative integer, got {:?}", MAX_SIZE_ENV, raw))
        })?;
        Ok(self)
    }
}

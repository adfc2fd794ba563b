//! Configuration management for typegraph.
//!
//! Configuration lives in a YAML file (`typegraph.yaml` by default). Every
//! field is optional; missing fields fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{DEFAULT_EXCLUDED_PREFIXES, ReferenceFilter};
use crate::store::{CacheMode, StoreConfig};

/// Name of the configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "typegraph.yaml";

/// Configuration file structure for typegraph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Directory receiving fragments and module graphs
    pub output_dir: PathBuf,

    /// Key of the analyzed module; empty means `module`
    pub module_key: String,

    /// Cache staleness policy for per-file fragments
    pub cache_mode: CacheMode,

    /// Referenced types under these prefixes are left out of the graph
    pub excluded_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            module_key: String::new(),
            cache_mode: CacheMode::default(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid YAML for this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise return the defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails and [`Error::Io`] if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Store settings derived from this configuration.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            output_dir: self.output_dir.clone(),
            module_key: self.module_key.clone(),
            cache_mode: self.cache_mode,
        }
    }

    /// Reference filter derived from this configuration.
    #[must_use]
    pub fn reference_filter(&self) -> ReferenceFilter {
        ReferenceFilter::new(self.excluded_prefixes.iter().cloned())
    }
}

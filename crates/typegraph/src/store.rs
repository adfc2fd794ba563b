//! Persistence of graphs on disk.
//!
//! The store owns every file-system concern so the core can stay purely
//! in-memory. It knows two kinds of files, both in the canonical JSON format
//! of [`crate::codec`]:
//!
//! - **Fragments** (`<fileKey>.json`): a single-file graph written once that
//!   file has been scanned. Its presence marks the file as already analyzed.
//! - **Module graphs** (`<moduleKey>-graph.json`, or `module-graph.json` for
//!   an empty key): the aggregate written once per analysis run.
//!
//! ## Cache staleness
//!
//! With [`CacheMode::Existence`] a fragment on disk is trusted as-is, even if
//! the source file changed since it was written. [`CacheMode::ContentHash`]
//! additionally stores a sha256 of the source next to the fragment and treats
//! a mismatch as a cache miss.
//!
//! ## Atomic writes
//!
//! Files are written to a `.tmp` sibling and renamed into place, so readers
//! never observe a partially written graph.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::graph::DependencyGraph;

/// Module name used when the module key is empty.
pub const DEFAULT_MODULE_NAME: &str = "module";

const FRAGMENT_SUFFIX: &str = ".json";
const GRAPH_SUFFIX: &str = "-graph.json";
const HASH_SUFFIX: &str = ".sha256";

/// How the per-file cache decides that a file is already analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    /// A fragment on disk means the file is analyzed. No staleness check.
    #[default]
    Existence,
    /// The fragment must also carry a matching hash of the source content.
    ContentHash,
}

/// Where and under which names graphs are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory receiving fragments and module graphs.
    pub output_dir: PathBuf,
    /// Key of the analyzed module. May be empty.
    pub module_key: String,
    /// Cache staleness policy.
    pub cache_mode: CacheMode,
}

/// File-system boundary for persisted graphs.
#[derive(Debug, Clone)]
pub struct GraphStore {
    config: StoreConfig,
}

impl GraphStore {
    /// Create a store from explicit configuration.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the fragment for a file key.
    ///
    /// Keys are always placed under the output directory, even when they
    /// look like absolute paths.
    #[must_use]
    pub fn fragment_path(&self, file_key: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{FRAGMENT_SUFFIX}", relative_key(file_key)))
    }

    /// Path of the module-level aggregate.
    #[must_use]
    pub fn module_graph_path(&self) -> PathBuf {
        let key = if self.config.module_key.is_empty() {
            DEFAULT_MODULE_NAME
        } else {
            self.config.module_key.as_str()
        };
        self.config.output_dir.join(format!("{key}{GRAPH_SUFFIX}"))
    }

    fn hash_path(&self, file_key: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!(
                "{}{FRAGMENT_SUFFIX}{HASH_SUFFIX}",
                relative_key(file_key)
            ))
    }

    /// Returns `true` if `file_key` is already analyzed.
    ///
    /// `source` is the current content of the file. It is only consulted in
    /// [`CacheMode::ContentHash`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the stored hash exists but cannot be read.
    pub fn is_cached(&self, file_key: &str, source: Option<&[u8]>) -> Result<bool> {
        if !self.fragment_path(file_key).exists() {
            return Ok(false);
        }
        match (self.config.cache_mode, source) {
            (CacheMode::Existence, _) => Ok(true),
            // Without content there is nothing to compare against.
            (CacheMode::ContentHash, None) => Ok(false),
            (CacheMode::ContentHash, Some(bytes)) => {
                let hash_path = self.hash_path(file_key);
                if !hash_path.exists() {
                    return Ok(false);
                }
                let stored = fs::read_to_string(hash_path)?;
                Ok(stored.trim() == content_hash(bytes))
            }
        }
    }

    /// Persist the fragment for one scanned file.
    ///
    /// In [`CacheMode::ContentHash`], `source` is hashed and stored next to
    /// the fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_fragment(
        &self,
        file_key: &str,
        fragment: &DependencyGraph,
        source: Option<&[u8]>,
    ) -> Result<PathBuf> {
        let path = self.fragment_path(file_key);
        write_atomic(&path, codec::encode(fragment)?.as_bytes())?;
        if let (CacheMode::ContentHash, Some(bytes)) = (self.config.cache_mode, source) {
            write_atomic(&self.hash_path(file_key), content_hash(bytes).as_bytes())?;
        }
        debug!(file_key, path = %path.display(), "Wrote fragment");
        Ok(path)
    }

    /// Load the fragment of a file key.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be read or decoded.
    pub fn read_fragment(&self, file_key: &str) -> Result<DependencyGraph> {
        read_graph(&self.fragment_path(file_key))
    }

    /// Persist the module-level aggregate and return where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_module_graph(&self, graph: &DependencyGraph) -> Result<PathBuf> {
        let path = self.module_graph_path();
        write_graph(&path, graph)?;
        debug!(path = %path.display(), records = graph.len(), "Wrote module graph");
        Ok(path)
    }

    /// Load the module-level aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be read or decoded.
    pub fn read_module_graph(&self) -> Result<DependencyGraph> {
        read_graph(&self.module_graph_path())
    }
}

/// Read and decode a graph file.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be opened and
/// [`crate::Error::MalformedGraph`] if it cannot be decoded.
pub fn read_graph(path: &Path) -> Result<DependencyGraph> {
    let file = fs::File::open(path)?;
    codec::decode_from_reader(std::io::BufReader::new(file))
}

/// Encode a graph and write it atomically to `path`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_graph(path: &Path, graph: &DependencyGraph) -> Result<()> {
    write_atomic(path, codec::encode(graph)?.as_bytes())
}

fn relative_key(file_key: &str) -> &str {
    file_key.trim_start_matches(['/', '\\'])
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

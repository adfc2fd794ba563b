//! CLI command implementations.

use std::path::PathBuf;

use typegraph::{Config, GraphStore};

pub mod check;
pub mod dot;
pub mod impact;
pub mod merge;

/// Resolve an explicit graph path, or fall back to the configured module graph.
fn graph_path(config: &Config, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| GraphStore::new(config.store_config()).module_graph_path())
}

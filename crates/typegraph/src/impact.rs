//! One-hop impact analysis.
//!
//! A file is impacted by a change to `F` when it references at least one type
//! that `F` declares. The relation is not followed transitively: if `C`
//! references only types of `B`, and `B` references types of `A`, a change to
//! `A` reports `B` but not `C`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::record::SourceRecord;

/// Records directly impacted by a change to `changed_path`, in graph order.
///
/// The changed record itself is included when it references one of its own
/// declared types.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if no record in the graph has the path.
pub fn impacted_by<'g>(
    graph: &'g DependencyGraph,
    changed_path: &Path,
) -> Result<Vec<&'g SourceRecord>> {
    let changed = graph
        .record(changed_path)
        .ok_or_else(|| Error::record_not_found(changed_path))?;

    let declared: HashSet<&str> = changed
        .declared_types()
        .iter()
        .map(String::as_str)
        .collect();

    if declared.is_empty() {
        return Ok(Vec::new());
    }

    // Indexed parallel iterators keep input order on collect.
    let impacted: Vec<&SourceRecord> = graph
        .records()
        .par_iter()
        .filter(|record| {
            record
                .referenced_types()
                .iter()
                .any(|name| declared.contains(name.as_str()))
        })
        .collect();

    debug!(
        changed = %changed_path.display(),
        impacted = impacted.len(),
        "Computed impact"
    );

    Ok(impacted)
}

impl DependencyGraph {
    /// Records directly impacted by a change to `changed_path`.
    ///
    /// See [`impacted_by`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record in the graph has the path.
    pub fn impacted_by(&self, changed_path: &Path) -> Result<Vec<&SourceRecord>> {
        impacted_by(self, changed_path)
    }
}

/// Owned summary of an impact query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactReport {
    /// The file that changed.
    pub changed: PathBuf,
    /// Paths of directly impacted files, in graph order.
    pub impacted: Vec<PathBuf>,
}

impl ImpactReport {
    /// Run an impact query and keep only the paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record in the graph has the path.
    pub fn compute(graph: &DependencyGraph, changed_path: &Path) -> Result<Self> {
        let impacted = impacted_by(graph, changed_path)?
            .into_iter()
            .map(|r| r.path().to_path_buf())
            .collect();
        Ok(Self {
            changed: changed_path.to_path_buf(),
            impacted,
        })
    }

    /// Returns `true` if the change impacts the file that changed.
    #[must_use]
    pub fn is_self_referencing(&self) -> bool {
        self.impacted.contains(&self.changed)
    }
}

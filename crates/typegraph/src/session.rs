//! One analysis run over a module.
//!
//! An [`AnalysisSession`] drives an [`Extractor`] over the files of a module,
//! reusing cached fragments where the store already has them, and writes the
//! module aggregate at the end of the run.
//!
//! Cached files are not dropped from the run: their fragment is decoded and
//! its records are added to the aggregate in scan order, just like freshly
//! extracted ones.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::extract::{Extractor, ReferenceFilter};
use crate::graph::DependencyGraph;
use crate::record::SourceRecord;
use crate::store::{CacheMode, GraphStore};

/// What happened to a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The file's fragment was reused from the store.
    Cached,
    /// The file was extracted and its fragment written.
    Extracted,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Files whose fragment was reused.
    pub files_cached: usize,
    /// Files extracted during this run.
    pub files_extracted: usize,
}

/// A single analysis run: scan files, then [`finish`](Self::finish).
pub struct AnalysisSession<E> {
    store: GraphStore,
    extractor: E,
    filter: ReferenceFilter,
    records: Vec<SourceRecord>,
    stats: SessionStats,
}

impl<E: Extractor> AnalysisSession<E> {
    /// Start a run writing into `store`, extracting with `extractor`.
    pub fn new(store: GraphStore, extractor: E, filter: ReferenceFilter) -> Self {
        Self {
            store,
            extractor,
            filter,
            records: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Scan one file, keyed by its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the source or a cached fragment cannot be read,
    /// if extraction fails, or if the fragment cannot be written.
    pub fn scan(&mut self, path: &Path) -> Result<ScanOutcome> {
        let file_key = path.to_string_lossy();
        let source = match self.store.config().cache_mode {
            CacheMode::Existence => None,
            CacheMode::ContentHash => Some(std::fs::read(path)?),
        };

        if self.store.is_cached(&file_key, source.as_deref())? {
            let fragment = self.store.read_fragment(&file_key)?;
            debug!(file_key = %file_key, records = fragment.len(), "Reusing cached fragment");
            self.records.extend(fragment.into_records());
            self.stats.files_cached += 1;
            return Ok(ScanOutcome::Cached);
        }

        let record = self.filter.apply(self.extractor.extract(path)?);
        let fragment = DependencyGraph::new(vec![record]);
        self.store
            .write_fragment(&file_key, &fragment, source.as_deref())?;
        self.records.extend(fragment.into_records());
        self.stats.files_extracted += 1;
        Ok(ScanOutcome::Extracted)
    }

    /// Records collected so far, in scan order.
    #[must_use]
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Build the module graph, persist it, and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the module graph cannot be written.
    pub fn finish(self) -> Result<(PathBuf, DependencyGraph, SessionStats)> {
        let graph = DependencyGraph::new(self.records);
        let path = self.store.write_module_graph(&graph)?;
        debug!(
            cached = self.stats.files_cached,
            extracted = self.stats.files_extracted,
            "Finished analysis"
        );
        Ok((path, graph, self.stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    fn fixed_extractor(path: &Path) -> Result<SourceRecord> {
        Ok(SourceRecord::new(
            path,
            vec![format!("pkg.{}", path.file_stem().unwrap().to_string_lossy())],
            vec!["java.util.List".into(), "pkg.Base".into()],
        ))
    }

    #[test]
    fn extracted_records_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new(StoreConfig {
            output_dir: dir.path().to_path_buf(),
            ..StoreConfig::default()
        });
        let mut session = AnalysisSession::new(store, fixed_extractor, ReferenceFilter::default());

        let outcome = session.scan(Path::new("Child.java")).unwrap();

        assert_eq!(outcome, ScanOutcome::Extracted);
        assert_eq!(session.records()[0].referenced_types(), ["pkg.Base"]);
        assert!(dir.path().join("Child.java.json").exists());
    }
}

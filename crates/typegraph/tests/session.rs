//! Integration tests for analysis runs and the per-file cache.
//!
//! These tests drive `AnalysisSession` against a real directory:
//! - fragments and the module aggregate land where the store says
//! - existence-only caching trusts stale fragments
//! - content-hash caching re-extracts modified files

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use typegraph::{
    AnalysisSession, CacheMode, Error, Extractor, GraphStore, ReferenceFilter, ScanOutcome,
    SourceRecord, StoreConfig, read_graph,
};

/// Reads `declares:` and `imports:` lines from a fake source file.
struct LineExtractor;

impl Extractor for LineExtractor {
    fn extract(&self, path: &Path) -> typegraph::Result<SourceRecord> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::extraction(path, e.to_string()))?;
        let mut declared = Vec::new();
        let mut referenced = Vec::new();
        for line in content.lines() {
            if let Some(name) = line.strip_prefix("declares:") {
                declared.push(name.trim().to_string());
            } else if let Some(name) = line.strip_prefix("imports:") {
                referenced.push(name.trim().to_string());
            }
        }
        Ok(SourceRecord::new(path, declared, referenced))
    }
}

struct Workspace {
    dir: TempDir,
    sources: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let sources = dir.path().join("src");
        let output = dir.path().join("out");
        fs::create_dir_all(&sources).unwrap();
        Self {
            dir,
            sources,
            output,
        }
    }

    fn write_source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.sources.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn store(&self, module_key: &str, cache_mode: CacheMode) -> GraphStore {
        GraphStore::new(StoreConfig {
            output_dir: self.output.clone(),
            module_key: module_key.to_string(),
            cache_mode,
        })
    }

    fn session(&self, module_key: &str, cache_mode: CacheMode) -> AnalysisSession<LineExtractor> {
        AnalysisSession::new(
            self.store(module_key, cache_mode),
            LineExtractor,
            ReferenceFilter::default(),
        )
    }
}

#[test]
fn run_writes_fragments_and_module_graph() {
    let ws = Workspace::new();
    let base = ws.write_source(
        "Base.java",
        "declares: org.example.Base\nimports: java.util.List\n",
    );
    let child = ws.write_source(
        "Child.java",
        "declares: org.example.Child\nimports: org.example.Base\n",
    );
    let store = ws.store("", CacheMode::Existence);
    let mut session = ws.session("", CacheMode::Existence);

    assert_eq!(session.scan(&base).unwrap(), ScanOutcome::Extracted);
    assert_eq!(session.scan(&child).unwrap(), ScanOutcome::Extracted);
    let (path, graph, stats) = session.finish().unwrap();

    assert_eq!(path, ws.output.join("module-graph.json"));
    assert_eq!(stats.files_extracted, 2);
    assert!(graph.records()[0].referenced_types().is_empty());
    assert!(store.fragment_path(&base.to_string_lossy()).exists());

    let reloaded = read_graph(&path).unwrap();
    let impacted = reloaded.impacted_by(&base).unwrap();
    assert_eq!(impacted.len(), 1);
    assert_eq!(impacted[0].path(), child.as_path());
    assert!(ws.dir.path().exists());
}

#[test]
fn existence_cache_reuses_stale_fragment() {
    let ws = Workspace::new();
    let file = ws.write_source("A.java", "declares: pkg.A\n");

    let mut first = ws.session("core", CacheMode::Existence);
    first.scan(&file).unwrap();
    first.finish().unwrap();

    ws.write_source("A.java", "declares: pkg.Renamed\n");
    let mut second = ws.session("core", CacheMode::Existence);

    assert_eq!(second.scan(&file).unwrap(), ScanOutcome::Cached);
    let (path, graph, stats) = second.finish().unwrap();

    assert_eq!(path, ws.output.join("core-graph.json"));
    assert_eq!(stats.files_cached, 1);
    assert_eq!(graph.records()[0].declared_types(), ["pkg.A"]);
}

#[test]
fn content_hash_cache_detects_modified_source() {
    let ws = Workspace::new();
    let unchanged = ws.write_source("Keep.java", "declares: pkg.Keep\n");
    let changed = ws.write_source("Edit.java", "declares: pkg.Edit\n");

    let mut first = ws.session("", CacheMode::ContentHash);
    first.scan(&unchanged).unwrap();
    first.scan(&changed).unwrap();
    first.finish().unwrap();

    ws.write_source("Edit.java", "declares: pkg.Edited\n");
    let mut second = ws.session("", CacheMode::ContentHash);

    assert_eq!(second.scan(&unchanged).unwrap(), ScanOutcome::Cached);
    assert_eq!(second.scan(&changed).unwrap(), ScanOutcome::Extracted);
    let (_, graph, stats) = second.finish().unwrap();

    assert_eq!(stats.files_cached, 1);
    assert_eq!(stats.files_extracted, 1);
    assert_eq!(graph.records()[1].declared_types(), ["pkg.Edited"]);
}

#[test]
fn cached_and_extracted_records_keep_scan_order() {
    let ws = Workspace::new();
    let a = ws.write_source("A.java", "declares: pkg.A\n");
    let b = ws.write_source("B.java", "declares: pkg.B\nimports: pkg.A\n");

    let mut warmup = ws.session("", CacheMode::Existence);
    warmup.scan(&b).unwrap();

    let mut session = ws.session("", CacheMode::Existence);
    assert_eq!(session.scan(&a).unwrap(), ScanOutcome::Extracted);
    assert_eq!(session.scan(&b).unwrap(), ScanOutcome::Cached);

    let paths: Vec<&Path> = session.records().iter().map(SourceRecord::path).collect();
    assert_eq!(paths, [a.as_path(), b.as_path()]);
}

#[test]
fn extraction_failure_is_reported() {
    let ws = Workspace::new();
    let missing = ws.sources.join("Missing.java");
    let mut session = ws.session("", CacheMode::Existence);

    let result = session.scan(&missing);

    assert!(matches!(result, Err(Error::Extraction { .. })));
    assert!(!ws.output.join("module-graph.json").exists());
}

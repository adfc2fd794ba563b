//! The module-level aggregate of source records.
//!
//! A [`DependencyGraph`] owns an ordered list of [`SourceRecord`]s and an
//! index from declared type name to the path of the file declaring it. The
//! index is computed once, at construction, and never changes afterwards: a
//! changed file means re-extracting and building a new graph.
//!
//! ## Duplicate declarations
//!
//! When two files declare the same type name, the record later in the list
//! owns the name in the index (last writer wins). Duplicates are kept visible
//! through [`DependencyGraph::duplicate_declarations`] and a warning at
//! construction time; they are not rejected.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::record::SourceRecord;

/// A type name declared by more than one file in the same graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDeclaration {
    /// The fully qualified type name.
    pub type_name: String,
    /// Every declaring file, in graph order. The last entry owns the name.
    pub paths: Vec<PathBuf>,
}

/// An immutable per-module dependency graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    records: Vec<SourceRecord>,
    index: HashMap<String, PathBuf>,
    duplicates: Vec<DuplicateDeclaration>,
}

impl DependencyGraph {
    /// Build a graph from records in extraction order.
    ///
    /// Never fails. The declared-type index is computed eagerly.
    #[must_use]
    pub fn new(records: Vec<SourceRecord>) -> Self {
        let mut index: HashMap<String, PathBuf> = HashMap::new();
        for record in &records {
            for type_name in record.declared_types() {
                index.insert(type_name.clone(), record.path().to_path_buf());
            }
        }

        let duplicates = find_duplicates(&records);
        for dup in &duplicates {
            warn!(
                type_name = %dup.type_name,
                declarers = dup.paths.len(),
                owner = %dup.paths.last().map_or_else(String::new, |p| p.display().to_string()),
                "type declared by more than one file; last declaration wins"
            );
        }

        debug!(
            records = records.len(),
            declared_types = index.len(),
            "Built dependency graph"
        );

        Self {
            records,
            index,
            duplicates,
        }
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Number of records in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the graph holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose path equals `path`.
    #[must_use]
    pub fn record(&self, path: &Path) -> Option<&SourceRecord> {
        self.records.iter().find(|r| r.path() == path)
    }

    /// Path of the file that owns `type_name` in the declared-type index.
    #[must_use]
    pub fn owner_of(&self, type_name: &str) -> Option<&Path> {
        self.index.get(type_name).map(PathBuf::as_path)
    }

    /// Type names declared by more than one file, in first-seen order.
    #[must_use]
    pub fn duplicate_declarations(&self) -> &[DuplicateDeclaration] {
        &self.duplicates
    }

    /// Consume the graph and return its records.
    #[must_use]
    pub fn into_records(self) -> Vec<SourceRecord> {
        self.records
    }
}

fn find_duplicates(records: &[SourceRecord]) -> Vec<DuplicateDeclaration> {
    let mut declarers: HashMap<&str, Vec<&Path>> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in records {
        for type_name in record.declared_types() {
            let paths = declarers.entry(type_name.as_str()).or_insert_with(|| {
                first_seen.push(type_name.as_str());
                Vec::new()
            });
            // A file declaring a name twice is one declarer.
            if paths.last() != Some(&record.path()) {
                paths.push(record.path());
            }
        }
    }

    first_seen
        .into_iter()
        .filter_map(|name| {
            let paths = &declarers[name];
            (paths.len() > 1).then(|| DuplicateDeclaration {
                type_name: name.to_string(),
                paths: paths.iter().map(|p| p.to_path_buf()).collect(),
            })
        })
        .collect()
}

impl FromIterator<SourceRecord> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = SourceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! The per-file entity of the graph.

use std::path::{Path, PathBuf};

/// One scanned source file: the types it declares and the types it references.
///
/// Both lists are kept exactly as the extractor observed them, in order and
/// with duplicates. A record is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRecord {
    path: PathBuf,
    declared_types: Vec<String>,
    referenced_types: Vec<String>,
}

impl SourceRecord {
    /// Create a record for a file.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        declared_types: Vec<String>,
        referenced_types: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            declared_types,
            referenced_types,
        }
    }

    /// Opaque identifier of the file, unique within a graph.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fully qualified names of the types declared in the file.
    #[must_use]
    pub fn declared_types(&self) -> &[String] {
        &self.declared_types
    }

    /// Fully qualified names of the types the file depends on.
    #[must_use]
    pub fn referenced_types(&self) -> &[String] {
        &self.referenced_types
    }

    /// Returns `true` if the file references no types at all.
    #[must_use]
    pub fn has_no_references(&self) -> bool {
        self.referenced_types.is_empty()
    }

    /// Consume the record and return its parts.
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, Vec<String>, Vec<String>) {
        (self.path, self.declared_types, self.referenced_types)
    }
}

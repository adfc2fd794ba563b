//! Canonical JSON encoding of a [`DependencyGraph`].
//!
//! The document shape is fixed:
//!
//! ```text
//! {
//!   "files": [
//!     {
//!       "path": "src/main/java/org/example/Child.java",
//!       "classes": ["org.example.Child"],
//!       "imports": ["org.example.Base"]
//!     }
//!   ]
//! }
//! ```
//!
//! Fields are always written in the order `path`, `classes`, `imports`, and
//! list order is preserved in both directions. Encoding is deterministic and
//! decoding then re-encoding reproduces the exact same bytes, so persisted
//! graphs can be compared byte for byte.
//!
//! Decoding is strict: a missing `files`, `path`, `classes` or `imports` key
//! is a [`Error::MalformedGraph`], never an empty default.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::record::SourceRecord;

#[derive(Serialize)]
struct GraphDocumentRef<'a> {
    files: Vec<FileEntryRef<'a>>,
}

#[derive(Serialize)]
struct FileEntryRef<'a> {
    path: &'a Path,
    classes: &'a [String],
    imports: &'a [String],
}

#[derive(Deserialize)]
struct GraphDocument {
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct FileEntry {
    path: PathBuf,
    classes: Vec<String>,
    imports: Vec<String>,
}

impl<'a> From<&'a DependencyGraph> for GraphDocumentRef<'a> {
    fn from(graph: &'a DependencyGraph) -> Self {
        let files = graph
            .records()
            .iter()
            .map(|record| FileEntryRef {
                path: record.path(),
                classes: record.declared_types(),
                imports: record.referenced_types(),
            })
            .collect();
        Self { files }
    }
}

impl From<GraphDocument> for DependencyGraph {
    fn from(document: GraphDocument) -> Self {
        document
            .files
            .into_iter()
            .map(|entry| SourceRecord::new(entry.path, entry.classes, entry.imports))
            .collect()
    }
}

/// Encode a graph to its canonical JSON text, terminated by a newline.
///
/// # Errors
///
/// Returns [`Error::Encode`] if a record path is not valid UTF-8.
pub fn encode(graph: &DependencyGraph) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&GraphDocumentRef::from(graph))
        .map_err(|e| Error::Encode(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Encode a graph into a writer.
///
/// # Errors
///
/// Returns [`Error::Encode`] if a record path is not valid UTF-8, or
/// [`Error::Io`] if writing fails.
pub fn encode_to_writer<W: Write>(graph: &DependencyGraph, mut writer: W) -> Result<()> {
    let text = encode(graph)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Decode a graph from canonical JSON text.
///
/// # Errors
///
/// Returns [`Error::MalformedGraph`] if the text is not JSON or does not have
/// the expected shape.
pub fn decode(text: &str) -> Result<DependencyGraph> {
    let document: GraphDocument =
        serde_json::from_str(text).map_err(|e| Error::MalformedGraph(e.to_string()))?;
    Ok(document.into())
}

/// Decode a graph from a reader.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails and [`Error::MalformedGraph`] if the
/// content does not have the expected shape.
pub fn decode_from_reader<R: Read>(reader: R) -> Result<DependencyGraph> {
    let document: GraphDocument = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::MalformedGraph(e.to_string())
        }
    })?;
    Ok(document.into())
}

//! # typegraph: Per-Module Type Dependency Graphs
//!
//! typegraph records, for every source file of a module, which types the file
//! declares and which types it references, and answers two questions over
//! that graph:
//!
//! - "If I change file F, which other files are potentially impacted?"
//! - "What does the whole graph look like?" (as Graphviz DOT)
//!
//! ## Design Philosophy
//!
//! - **Front ends extract, the graph answers** - parsing is someone else's job;
//!   typegraph receives `(path, declared, referenced)` triples via [`Extractor`]
//! - **One hop only** - impact is direct reference, never a transitive closure
//! - **Byte-stable persistence** - the JSON encoding is canonical, so persisted
//!   graphs compare byte for byte
//! - **Pure core, explicit boundary** - only [`GraphStore`] touches the disk
//!
//! ## Quick Start
//!
//! ```
//! use std::path::Path;
//! use typegraph::{DependencyGraph, SourceRecord, codec, render_dot};
//!
//! let graph = DependencyGraph::new(vec![
//!     SourceRecord::new("A.java", vec!["pkg.A".into()], vec![]),
//!     SourceRecord::new("B.java", vec!["pkg.B".into()], vec!["pkg.A".into()]),
//! ]);
//!
//! let impacted = graph.impacted_by(Path::new("A.java"))?;
//! assert_eq!(impacted[0].path(), Path::new("B.java"));
//!
//! let text = codec::encode(&graph)?;
//! assert_eq!(codec::encode(&codec::decode(&text)?)?, text);
//!
//! assert!(render_dot(&graph).contains("\"B.java\" -> \"A.java\";"));
//! # Ok::<(), typegraph::Error>(())
//! ```

pub mod codec;
mod config;
mod dot;
mod error;
mod extract;
mod graph;
mod impact;
mod record;
mod session;
mod store;

pub use config::{CONFIG_FILE_NAME, Config};
pub use dot::render_dot;
pub use error::{Error, Result};
pub use extract::{DEFAULT_EXCLUDED_PREFIXES, Extractor, ReferenceFilter, normalize_type_name};
pub use graph::{DependencyGraph, DuplicateDeclaration};
pub use impact::{ImpactReport, impacted_by};
pub use record::SourceRecord;
pub use session::{AnalysisSession, ScanOutcome, SessionStats};
pub use store::{CacheMode, DEFAULT_MODULE_NAME, GraphStore, StoreConfig, read_graph, write_graph};

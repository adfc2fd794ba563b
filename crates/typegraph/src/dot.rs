//! Graphviz DOT rendering.

use std::fmt::Write;
use std::path::Path;

use crate::graph::DependencyGraph;

/// Render the graph as a `digraph module { ... }` document.
///
/// For each record, in graph order:
/// - no referenced types: a node line `"<path>";`
/// - otherwise one edge line `"<path>" -> "<owner>";` per referenced type
///   that some file in the graph declares. Unresolved references are dropped,
///   so a record whose references all point outside the graph emits nothing.
#[must_use]
pub fn render_dot(graph: &DependencyGraph) -> String {
    let mut out = String::from("digraph module {\n");

    for record in graph.records() {
        let from = quote(record.path());
        if record.has_no_references() {
            let _ = writeln!(out, "  {from};");
            continue;
        }
        for type_name in record.referenced_types() {
            if let Some(owner) = graph.owner_of(type_name) {
                let _ = writeln!(out, "  {from} -> {};", quote(owner));
            }
        }
    }

    out.push_str("}\n");
    out
}

fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display().to_string().replace('"', "\\\""))
}

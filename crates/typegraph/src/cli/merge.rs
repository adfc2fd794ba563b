//! `typegraph merge` command implementation.

use std::path::PathBuf;

use colored::Colorize;
use typegraph::{Config, DependencyGraph, read_graph, write_graph};

/// Run the merge command.
pub fn run(
    config: &Config,
    fragments: &[PathBuf],
    output: Option<PathBuf>,
) -> Result<(), typegraph::Error> {
    let mut records = Vec::new();
    for fragment in fragments {
        records.extend(read_graph(fragment)?.into_records());
    }
    let graph = DependencyGraph::new(records);

    let output = super::graph_path(config, output);
    write_graph(&output, &graph)?;

    println!(
        "Merged {} fragments ({} files) into {}",
        fragments.len().to_string().green(),
        graph.len().to_string().green(),
        output.display().to_string().cyan().bold()
    );

    Ok(())
}

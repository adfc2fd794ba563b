//! `typegraph dot` command implementation.

use std::path::{Path, PathBuf};

use typegraph::{Config, read_graph, render_dot};

/// Run the dot command.
pub fn run(
    config: &Config,
    graph: Option<PathBuf>,
    output: Option<&Path>,
) -> Result<(), typegraph::Error> {
    let graph = read_graph(&super::graph_path(config, graph))?;
    let dot = render_dot(&graph);

    match output {
        Some(path) => std::fs::write(path, dot)?,
        None => print!("{dot}"),
    }

    Ok(())
}

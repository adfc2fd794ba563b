//! `typegraph check` command implementation.

use std::path::PathBuf;

use colored::Colorize;
use typegraph::{Config, codec};

/// Run the check command.
pub fn run(config: &Config, graph: Option<PathBuf>) -> Result<(), typegraph::Error> {
    let path = super::graph_path(config, graph);
    let text = std::fs::read_to_string(&path)?;
    let graph = codec::decode(&text)?;

    println!(
        "{}: {} files",
        path.display().to_string().cyan().bold(),
        graph.len().to_string().green()
    );

    if codec::encode(&graph)? == text {
        println!("  {}", "canonical encoding".green());
    } else {
        println!("  {}", "not in canonical encoding".yellow());
    }

    for dup in graph.duplicate_declarations() {
        println!(
            "  {}: {} declared by {} files",
            "warning".yellow(),
            dup.type_name.white().bold(),
            dup.paths.len()
        );
        for declarer in &dup.paths {
            println!("    {} {}", "•".dimmed(), declarer.display());
        }
    }

    Ok(())
}

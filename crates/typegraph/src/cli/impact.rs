//! `typegraph impact` command implementation.

use std::path::{Path, PathBuf};

use colored::Colorize;
use typegraph::{Config, ImpactReport, read_graph};

const MAX_DISPLAY_ITEMS: usize = 20;

/// Run the impact command.
pub fn run(config: &Config, graph: Option<PathBuf>, changed: &Path) -> Result<(), typegraph::Error> {
    let graph = read_graph(&super::graph_path(config, graph))?;
    let report = ImpactReport::compute(&graph, changed)?;

    println!(
        "Impact analysis for {}:",
        changed.display().to_string().cyan().bold()
    );
    println!();
    println!(
        "  {} ({} files):",
        "Directly impacted".white().bold(),
        report.impacted.len().to_string().green()
    );

    if report.impacted.is_empty() {
        println!("    {}", "(none)".dimmed());
        return Ok(());
    }

    for path in report.impacted.iter().take(MAX_DISPLAY_ITEMS) {
        println!("    {} {}", "•".dimmed(), path.display());
    }
    if report.impacted.len() > MAX_DISPLAY_ITEMS {
        println!(
            "    {} ... and {} more",
            "•".dimmed(),
            report.impacted.len() - MAX_DISPLAY_ITEMS
        );
    }

    Ok(())
}

//! typegraph CLI - query persisted type dependency graphs.
//!
//! Graphs are produced by an analysis front end through the library's
//! `AnalysisSession`; this binary reads them back for impact queries,
//! rendering, validation and merging of per-file fragments.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use typegraph::{CONFIG_FILE_NAME, Config};

mod cli;

/// typegraph: Per-module type dependency graphs.
#[derive(Parser)]
#[command(name = "typegraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./typegraph.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files directly impacted by a change to a file
    Impact {
        /// Path of the changed file, as recorded in the graph
        changed: PathBuf,

        /// Graph file (defaults to the configured module graph)
        #[arg(short, long)]
        graph: Option<PathBuf>,
    },

    /// Render the graph in Graphviz DOT format
    Dot {
        /// Graph file (defaults to the configured module graph)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a graph file and report duplicate declarations
    Check {
        /// Graph file (defaults to the configured module graph)
        #[arg(short, long)]
        graph: Option<PathBuf>,
    },

    /// Merge per-file fragments into one module graph
    Merge {
        /// Fragment files, in the order their records should appear
        #[arg(required = true)]
        fragments: Vec<PathBuf>,

        /// Output file (defaults to the configured module graph)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match cli.config {
        Some(path) => Config::load(&path),
        None => Config::load_or_default(&PathBuf::from(CONFIG_FILE_NAME)),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Impact { changed, graph } => cli::impact::run(&config, graph, &changed),
        Commands::Dot { graph, output } => cli::dot::run(&config, graph, output.as_deref()),
        Commands::Check { graph } => cli::check::run(&config, graph),
        Commands::Merge { fragments, output } => cli::merge::run(&config, &fragments, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

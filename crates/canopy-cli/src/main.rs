//! Canopy CLI - Command-line interface for Canopy
//!
//! Thin driver around the graph engine: parses flags into a filter
//! configuration, runs the analysis pipeline on a directory and prints or
//! writes the serialized graph data.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "canopy")]
#[command(author = "Canopy Contributors")]
#[command(version)]
#[command(about = "Map the dependency graph of a codebase", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a directory and emit its dependency graph as JSON
    Analyze {
        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Keep only these node types (repeatable: file, function)
        #[arg(long = "node-type")]
        node_types: Vec<String>,

        /// Keep only these edge types (repeatable: contains, imports)
        #[arg(long = "edge-type")]
        edge_types: Vec<String>,

        /// Keep nodes matching this term plus their immediate neighbors
        #[arg(long)]
        search: Option<String>,

        /// Cap the node count, keeping the best-connected nodes (0 = no cap)
        #[arg(long, default_value = "0")]
        max_nodes: usize,

        /// Use bare file names as labels instead of directory context
        #[arg(long)]
        flat: bool,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List circular dependencies in a directory
    Cycles {
        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show node and edge counts for a directory
    Stats {
        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            path,
            node_types,
            edge_types,
            search,
            max_nodes,
            flat,
            output,
            pretty,
        } => commands::analyze(
            &path,
            node_types,
            edge_types,
            search,
            max_nodes,
            flat,
            output.as_deref(),
            pretty,
        ),
        Commands::Cycles { path } => commands::cycles(&path),
        Commands::Stats { path } => commands::stats(&path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

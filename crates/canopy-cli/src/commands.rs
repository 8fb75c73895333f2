//! CLI command implementations.

use canopy_graph::{analyze_directory, build_graph, AnalysisOptions, FilterConfig};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    Ok(spinner)
}

/// Analyze a directory and emit the graph data as JSON.
#[allow(clippy::too_many_arguments)]
pub fn analyze(
    path: &Path,
    node_types: Vec<String>,
    edge_types: Vec<String>,
    search: Option<String>,
    max_nodes: usize,
    flat: bool,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let options = AnalysisOptions {
        filter: FilterConfig {
            node_types,
            edge_types,
            search_term: search.unwrap_or_default(),
            max_nodes,
        },
        preserve_namespace: !flat,
        ..Default::default()
    };

    debug!(path = %path.display(), "starting analysis");
    let progress = spinner("Analyzing codebase...")?;
    let data = analyze_directory(path, &options)?;
    progress.finish_and_clear();

    println!(
        "{} {} nodes, {} edges, {} cycles",
        "✓".green(),
        data.nodes.len().to_string().cyan(),
        data.edges.len().to_string().cyan(),
        data.cycles.len().to_string().cyan(),
    );
    if let Some(ref warning) = data.warning {
        println!("{} {}", "⚠".yellow(), warning);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };

    match output {
        Some(out_path) => {
            fs::write(out_path, json)?;
            println!("{} Wrote graph data to {}", "✓".green(), out_path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// List circular dependencies.
pub fn cycles(path: &Path) -> Result<()> {
    let progress = spinner("Looking for cycles...")?;
    let data = analyze_directory(path, &AnalysisOptions::default())?;
    progress.finish_and_clear();

    if data.cycles.is_empty() {
        println!("{} No circular dependencies found", "✓".green());
        return Ok(());
    }

    println!(
        "{} {} circular dependencies:\n",
        "⚠".yellow(),
        data.cycles.len().to_string().yellow()
    );
    for cycle in &data.cycles {
        let chain = cycle.display_nodes.join(" → ");
        println!(
            "  {} {} {}",
            format!("[{}]", cycle.length).dimmed(),
            chain.red(),
            "↩".dimmed()
        );
    }

    Ok(())
}

/// Show node and edge counts.
pub fn stats(path: &Path) -> Result<()> {
    let progress = spinner("Scanning...")?;
    let records = canopy_core::scan_directory(path)?;
    let graph = build_graph(&records);
    progress.finish_and_clear();

    let stats = graph.stats();
    println!("{}", "Graph statistics".cyan());
    println!("  files:     {}", stats.files.to_string().cyan());
    println!("  functions: {}", stats.functions.to_string().cyan());
    println!("  contains:  {}", stats.contains.to_string().cyan());
    println!("  imports:   {}", stats.imports.to_string().cyan());
    println!("  nodes:     {}", stats.node_count.to_string().cyan());
    println!("  edges:     {}", stats.edge_count.to_string().cyan());

    Ok(())
}

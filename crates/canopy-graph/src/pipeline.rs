//! The analysis pipeline.
//!
//! One synchronous pass per request: scan, build, weight, detect cycles,
//! filter, export. Every request owns its graph for the duration of the
//! call and the graph is dropped once the serialized result is returned;
//! nothing is shared or cached across requests.

use crate::builder::build_graph;
use crate::cycles::{detect_cycles, CycleLimits};
use crate::error::Result;
use crate::export::{to_graph_data, GraphData};
use crate::filter::{apply_filters, FilterConfig};
use crate::weight::compute_edge_weights;
use canopy_core::{scan_directory, FileRecord};
use std::path::Path;
use tracing::{info, warn};

/// Options for one analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// View restriction; the default restricts nothing.
    pub filter: FilterConfig,

    /// Keep directory context in display labels.
    pub preserve_namespace: bool,

    /// Size guard for cycle enumeration.
    pub cycle_limits: CycleLimits,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            preserve_namespace: true,
            cycle_limits: CycleLimits::default(),
        }
    }
}

/// Scans a directory and runs the full pipeline on what it finds.
///
/// # Errors
///
/// Fails only when the directory itself cannot be scanned; per-file and
/// per-stage trouble degrades gracefully (skipped files, empty cycle list).
pub fn analyze_directory(path: &Path, options: &AnalysisOptions) -> Result<GraphData> {
    let records = scan_directory(path)?;
    Ok(analyze_records(&records, options))
}

/// Runs the pipeline over pre-scanned records.
///
/// An empty batch yields an empty, valid result. When the cycle guard
/// trips the graph is still returned, with no cycles flagged.
pub fn analyze_records(records: &[FileRecord], options: &AnalysisOptions) -> GraphData {
    let mut graph = build_graph(records);
    compute_edge_weights(&mut graph);

    let cycles = match detect_cycles(&mut graph, &options.cycle_limits) {
        Ok(cycles) => cycles,
        Err(e) => {
            warn!(error = %e, "skipping cycle analysis");
            Vec::new()
        }
    };

    let graph = if options.filter.is_noop() {
        graph
    } else {
        apply_filters(&graph, &options.filter)
    };

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        cycles = cycles.len(),
        "analysis complete"
    );
    to_graph_data(&graph, &cycles, options.preserve_namespace)
}

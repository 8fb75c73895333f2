//! Graph construction from per-file analysis records.
//!
//! The builder runs in two passes, mirroring how records arrive:
//! 1. `add_record` turns each file into a file node, its functions into
//!    function nodes, and links them with `contains` edges.
//! 2. `resolve_imports` re-reads each file's raw text and adds `imports`
//!    edges between files based on a cheap substring heuristic.
//!
//! The import heuristic is deliberately crude: file A imports file B when
//! A's text contains the literal `import <stem>` or `from <stem>` for B's
//! file stem. It matches inside comments and strings and misses aliased
//! imports; downstream weights and cycle analysis are defined relative to
//! exactly this behavior, so it must not be upgraded to a real resolver.

use crate::edge::{DepEdge, EdgeKind};
use crate::graph::DepGraph;
use crate::node::DepNode;
use canopy_core::FileRecord;
use std::fs;
use tracing::{debug, warn};

/// Builds a [`DepGraph`] from file records.
pub struct GraphBuilder {
    graph: DepGraph,
    /// `(path, stem)` of every accepted record, for import inference.
    files: Vec<(String, String)>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: DepGraph::new(),
            files: Vec::new(),
        }
    }

    /// Adds one file record: the file node, its function nodes and the
    /// `contains` edges between them.
    ///
    /// Malformed records (empty path) are skipped with a diagnostic; one
    /// bad record never aborts the batch.
    pub fn add_record(&mut self, record: &FileRecord) {
        if record.path.is_empty() {
            warn!("skipping malformed file record with empty path");
            return;
        }

        self.graph
            .add_node(DepNode::file(&record.path, &record.name));

        for func in &record.functions {
            let func_id = format!("{}::{}", record.path, func.name);
            self.graph.add_node(DepNode::function(func_id.clone(), &func.name));
            self.graph
                .add_edge(&record.path, &func_id, DepEdge::new(EdgeKind::Contains));
        }

        self.files
            .push((record.path.clone(), record.stem().to_string()));
    }

    /// Second pass: infers `imports` edges between distinct file pairs.
    ///
    /// Each file's raw content is re-read from disk. An unreadable file
    /// loses its outgoing import edges but the pass continues for the rest.
    pub fn resolve_imports(&mut self) {
        for (path, _) in &self.files {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path, error = %e, "cannot read file for import inference");
                    continue;
                }
            };

            for (other_path, other_stem) in &self.files {
                if other_path == path || other_stem.is_empty() {
                    continue;
                }

                let plain = format!("import {}", other_stem);
                let from = format!("from {}", other_stem);
                if content.contains(&plain) || content.contains(&from) {
                    self.graph
                        .add_edge(path, other_path, DepEdge::new(EdgeKind::Imports));
                }
            }
        }
    }

    /// Finishes building: runs import inference and returns the graph.
    pub fn build(mut self) -> DepGraph {
        self.resolve_imports();
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "graph built"
        );
        self.graph
    }
}

/// Convenience wrapper: builds a graph from a full batch of records.
///
/// An empty batch produces an empty, valid graph.
pub fn build_graph(records: &[FileRecord]) -> DepGraph {
    let mut builder = GraphBuilder::new();
    for record in records {
        builder.add_record(record);
    }
    builder.build()
}

//! Serialized graph-data output.
//!
//! The final, wire-facing shape of an analysis: flat node and edge lists,
//! the detected cycles, and a fixed advisory when the graph is large enough
//! that rendering it whole is a bad idea. Canonical ids are always carried
//! alongside the shortened display labels.

use crate::display::shorten_path;
use crate::edge::EdgeKind;
use crate::graph::DepGraph;
use crate::node::NodeKind;
use serde::{Deserialize, Serialize};

/// Node count above which [`GraphData::warning`] is set.
pub const LARGE_GRAPH_THRESHOLD: usize = 100;

/// Fixed advisory text for large graphs.
pub const LARGE_GRAPH_WARNING: &str =
    "Graph contains more than 100 nodes; rendering may be slow. Apply filters to reduce the view.";

/// A node as serialized to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    /// Canonical id, stable for joins.
    pub id: String,
    /// Shortened human-readable label.
    pub display_id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub flags: Vec<String>,
}

/// An edge as serialized to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub weight: f64,
    pub flags: Vec<String>,
}

/// A cycle as serialized to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleData {
    /// Canonical member ids in traversal order.
    pub nodes: Vec<String>,
    /// Shortened labels, parallel to `nodes`.
    pub display_nodes: Vec<String>,
    pub length: usize,
}

/// The complete serialized analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub edges: Vec<EdgeData>,
    pub cycles: Vec<CycleData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Serializes a graph plus its cycle list into [`GraphData`].
///
/// Nodes are ordered by id and edges by `(source, target)` so output is
/// deterministic. `preserve_namespace` is forwarded to the display
/// formatter for both node labels and cycle-member labels.
pub fn to_graph_data(
    graph: &DepGraph,
    cycles: &[Vec<String>],
    preserve_namespace: bool,
) -> GraphData {
    let mut nodes: Vec<NodeData> = graph
        .nodes()
        .map(|node| NodeData {
            id: node.id.clone(),
            display_id: shorten_path(&node.id, preserve_namespace),
            kind: node.kind,
            name: node.name.clone(),
            flags: node.flags.clone(),
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut edges: Vec<EdgeData> = graph
        .edges()
        .map(|(source, target, edge)| EdgeData {
            source: source.to_string(),
            target: target.to_string(),
            kind: edge.kind,
            weight: edge.weight,
            flags: edge.flags.clone(),
        })
        .collect();
    edges.sort_by(|a, b| (a.source.as_str(), a.target.as_str()).cmp(&(b.source.as_str(), b.target.as_str())));

    let cycles: Vec<CycleData> = cycles
        .iter()
        .map(|cycle| CycleData {
            nodes: cycle.clone(),
            display_nodes: cycle
                .iter()
                .map(|id| shorten_path(id, preserve_namespace))
                .collect(),
            length: cycle.len(),
        })
        .collect();

    let warning = if nodes.len() > LARGE_GRAPH_THRESHOLD {
        Some(LARGE_GRAPH_WARNING.to_string())
    } else {
        None
    };

    GraphData {
        nodes,
        edges,
        cycles,
        warning,
    }
}

//! Graph filtering.
//!
//! Reduces a graph to the view a caller asked for. The four filters apply
//! in a fixed order (node types, edge types, search, node cap), each one
//! consuming the previous step's output and producing a new owned graph;
//! the input graph is never modified. Search keeps one hop of context
//! around every match so results stay readable in isolation.

use crate::graph::DepGraph;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Caller-facing filter configuration.
///
/// Empty collections, an empty search term and a zero node cap all mean
/// "no restriction", so the default value is a no-op filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Node kinds to keep (serialized form, e.g. `file`, `function`).
    #[serde(default)]
    pub node_types: Vec<String>,

    /// Edge kinds to keep (e.g. `contains`, `imports`).
    #[serde(default)]
    pub edge_types: Vec<String>,

    /// Case-insensitive substring matched against node id and name.
    #[serde(default)]
    pub search_term: String,

    /// Maximum nodes in the result; 0 disables the cap.
    #[serde(default)]
    pub max_nodes: usize,
}

impl FilterConfig {
    /// True if this configuration restricts nothing.
    pub fn is_noop(&self) -> bool {
        self.node_types.is_empty()
            && self.edge_types.is_empty()
            && self.search_term.is_empty()
            && self.max_nodes == 0
    }
}

/// Applies the full filter pipeline, returning a new graph.
pub fn apply_filters(graph: &DepGraph, config: &FilterConfig) -> DepGraph {
    let mut current = graph.clone();

    if !config.node_types.is_empty() {
        current = filter_node_types(&current, &config.node_types);
    }
    if !config.edge_types.is_empty() {
        current = filter_edge_types(&current, &config.edge_types);
    }
    if !config.search_term.is_empty() {
        current = filter_search(&current, &config.search_term);
    }
    if config.max_nodes > 0 && current.node_count() > config.max_nodes {
        current = filter_max_nodes(&current, config.max_nodes);
    }

    debug!(
        nodes = current.node_count(),
        edges = current.edge_count(),
        "filters applied"
    );
    current
}

/// Keeps nodes whose kind is in the list; incident edges of removed nodes
/// go with them.
fn filter_node_types(graph: &DepGraph, node_types: &[String]) -> DepGraph {
    let keep: HashSet<&str> = graph
        .nodes()
        .filter(|node| node_types.iter().any(|t| t == &node.kind.to_string()))
        .map(|node| node.id.as_str())
        .collect();
    graph.induced_subgraph(&keep)
}

/// Keeps edges whose kind is in the list; nodes survive even if isolated.
fn filter_edge_types(graph: &DepGraph, edge_types: &[String]) -> DepGraph {
    graph.retain_edges_by(|edge| edge_types.iter().any(|t| t == &edge.kind.to_string()))
}

/// Keeps nodes matching the term plus their immediate in/out neighbors in
/// the already-filtered graph, as an induced subgraph.
fn filter_search(graph: &DepGraph, term: &str) -> DepGraph {
    let needle = term.to_lowercase();

    let matches: Vec<&str> = graph
        .nodes()
        .filter(|node| {
            node.id.to_lowercase().contains(&needle) || node.name.to_lowercase().contains(&needle)
        })
        .map(|node| node.id.as_str())
        .collect();

    let mut keep: HashSet<&str> = matches.iter().copied().collect();
    for id in &matches {
        for neighbor in graph.neighbors(id, Direction::Outgoing) {
            keep.insert(neighbor);
        }
        for neighbor in graph.neighbors(id, Direction::Incoming) {
            keep.insert(neighbor);
        }
    }

    graph.induced_subgraph(&keep)
}

/// Caps the node count, preferring high total degree. Ties break on id
/// order: implementation-defined but stable across runs.
fn filter_max_nodes(graph: &DepGraph, max_nodes: usize) -> DepGraph {
    let mut ranked: Vec<(&str, usize)> = graph
        .nodes()
        .map(|node| (node.id.as_str(), graph.degree(&node.id)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let keep: HashSet<&str> = ranked
        .into_iter()
        .take(max_nodes)
        .map(|(id, _)| id)
        .collect();
    graph.induced_subgraph(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{DepEdge, EdgeKind};
    use crate::node::DepNode;

    /// Two files, one function each, mutual imports.
    fn sample_graph() -> DepGraph {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(DepNode::file("b.py", "b.py"));
        graph.add_node(DepNode::function("a.py::alpha", "alpha"));
        graph.add_node(DepNode::function("b.py::beta", "beta"));
        graph.add_edge("a.py", "a.py::alpha", DepEdge::new(EdgeKind::Contains));
        graph.add_edge("b.py", "b.py::beta", DepEdge::new(EdgeKind::Contains));
        graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports));
        graph.add_edge("b.py", "a.py", DepEdge::new(EdgeKind::Imports));
        graph
    }

    fn ids(graph: &DepGraph) -> Vec<&str> {
        let mut ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_noop_config_keeps_everything() {
        let graph = sample_graph();
        let filtered = apply_filters(&graph, &FilterConfig::default());
        assert_eq!(filtered.node_count(), graph.node_count());
        assert_eq!(filtered.edge_count(), graph.edge_count());
    }

    #[test]
    fn test_node_type_filter_drops_incident_edges() {
        let graph = sample_graph();
        let config = FilterConfig {
            node_types: vec!["file".into()],
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);

        assert_eq!(ids(&filtered), vec!["a.py", "b.py"]);
        // The contains edges died with the function nodes.
        assert_eq!(filtered.edge_count(), 2);
    }

    #[test]
    fn test_edge_type_filter_leaves_isolated_nodes() {
        let graph = sample_graph();
        let config = FilterConfig {
            edge_types: vec!["imports".into()],
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);

        assert_eq!(filtered.node_count(), 4);
        assert_eq!(filtered.edge_count(), 2);
        assert!(filtered.contains("a.py::alpha"));
    }

    #[test]
    fn test_search_keeps_one_hop_context() {
        let graph = sample_graph();
        let config = FilterConfig {
            search_term: "alpha".into(),
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);

        // alpha matched; a.py is its incoming neighbor. b.py is two hops
        // away and must not survive.
        assert_eq!(ids(&filtered), vec!["a.py", "a.py::alpha"]);
        assert!(filtered.has_edge("a.py", "a.py::alpha"));
    }

    #[test]
    fn test_search_retains_all_neighbors_of_matches() {
        let graph = sample_graph();
        let config = FilterConfig {
            search_term: "a.py".into(),
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);

        // "a.py" matches a.py and a.py::alpha by id; every immediate
        // neighbor of a match (including b.py) is kept.
        for id in ["a.py", "a.py::alpha", "b.py"] {
            assert!(filtered.contains(id), "{id} should be kept");
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let graph = sample_graph();
        let config = FilterConfig {
            search_term: "ALPHA".into(),
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);
        assert!(filtered.contains("a.py::alpha"));
    }

    #[test]
    fn test_search_with_no_matches_yields_empty_graph() {
        let graph = sample_graph();
        let config = FilterConfig {
            search_term: "nonexistent".into(),
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);
        assert_eq!(filtered.node_count(), 0);
        assert_eq!(filtered.edge_count(), 0);
    }

    #[test]
    fn test_max_nodes_prefers_high_degree() {
        // Star: hub with 6 leaves.
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("hub.py", "hub.py"));
        for i in 0..6 {
            let leaf = format!("leaf{i}.py");
            graph.add_node(DepNode::file(&leaf, &leaf));
            graph.add_edge("hub.py", &leaf, DepEdge::new(EdgeKind::Imports));
        }

        let config = FilterConfig {
            max_nodes: 3,
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);

        assert_eq!(filtered.node_count(), 3);
        assert!(filtered.contains("hub.py"));
    }

    #[test]
    fn test_max_nodes_tie_break_is_stable() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("hub.py", "hub.py"));
        for i in 0..20 {
            let leaf = format!("leaf{i:02}.py");
            graph.add_node(DepNode::file(&leaf, &leaf));
            graph.add_edge("hub.py", &leaf, DepEdge::new(EdgeKind::Imports));
        }
        let config = FilterConfig {
            max_nodes: 5,
            ..Default::default()
        };

        let first = apply_filters(&graph, &config);
        let second = apply_filters(&graph, &config);

        assert_eq!(first.node_count(), 5);
        assert!(first.contains("hub.py"));
        // Equal-degree leaves resolve the same way every run.
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_filters_compose_in_order() {
        let graph = sample_graph();
        let config = FilterConfig {
            node_types: vec!["file".into()],
            edge_types: vec!["imports".into()],
            search_term: "a.py".into(),
            max_nodes: 0,
        };
        let filtered = apply_filters(&graph, &config);

        // Function nodes were already gone before search ran, so only the
        // two file nodes remain.
        assert_eq!(ids(&filtered), vec!["a.py", "b.py"]);
        assert!(filtered.has_edge("a.py", "b.py"));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let graph = sample_graph();
        let config = FilterConfig {
            node_types: vec!["file".into()],
            search_term: "a".into(),
            max_nodes: 2,
            ..Default::default()
        };

        let once = apply_filters(&graph, &config);
        let twice = apply_filters(&once, &config);

        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(once.edge_count(), twice.edge_count());
    }

    #[test]
    fn test_input_graph_is_untouched() {
        let graph = sample_graph();
        let config = FilterConfig {
            node_types: vec!["function".into()],
            ..Default::default()
        };
        let _ = apply_filters(&graph, &config);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_unknown_type_yields_empty_graph_not_error() {
        let graph = sample_graph();
        let config = FilterConfig {
            node_types: vec!["event_handler".into()],
            ..Default::default()
        };
        let filtered = apply_filters(&graph, &config);
        assert_eq!(filtered.node_count(), 0);
    }
}

//! Core graph data structure.
//!
//! `DepGraph` wraps petgraph and adds a string-id index so callers can
//! address nodes by their canonical ids. It owns all node and edge storage;
//! callers get references or derived copies, never aliases into internals.

use crate::edge::{DepEdge, EdgeKind};
use crate::node::{DepNode, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The directed, attributed dependency graph.
///
/// Node identity is the canonical string id. Re-adding an existing id merges
/// attributes instead of duplicating the node, and at most one edge exists
/// per ordered `(source, target)` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: DiGraph<DepNode, DepEdge>,

    /// Maps canonical ids to graph node indexes.
    pub(crate) id_index: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, merging attributes if the id already exists.
    ///
    /// On merge the kind and name are overwritten and flags are unioned;
    /// the node is never duplicated.
    pub fn add_node(&mut self, node: DepNode) -> NodeIndex {
        if let Some(&index) = self.id_index.get(&node.id) {
            let existing = &mut self.graph[index];
            existing.kind = node.kind;
            existing.name = node.name;
            for tag in node.flags {
                existing.flag(&tag);
            }
            return index;
        }

        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.id_index.insert(id, index);
        index
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// Returns false (and adds nothing) when either endpoint is missing.
    /// Re-adding an existing pair merges flags and leaves the stored kind
    /// and weight untouched.
    pub fn add_edge(&mut self, source: &str, target: &str, edge: DepEdge) -> bool {
        let (Some(&from), Some(&to)) = (self.id_index.get(source), self.id_index.get(target))
        else {
            return false;
        };

        if let Some(existing) = self.graph.find_edge(from, to) {
            let stored = &mut self.graph[existing];
            for tag in edge.flags {
                stored.flag(&tag);
            }
        } else {
            self.graph.add_edge(from, to, edge);
        }
        true
    }

    /// Gets a node by its canonical id.
    pub fn get(&self, id: &str) -> Option<&DepNode> {
        let index = self.id_index.get(id)?;
        self.graph.node_weight(*index)
    }

    /// True if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Gets the edge for an ordered pair, if present.
    pub fn edge(&self, source: &str, target: &str) -> Option<&DepEdge> {
        let (&from, &to) = (self.id_index.get(source)?, self.id_index.get(target)?);
        let index = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(index)
    }

    /// True if the ordered pair has an edge.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Appends a tag to a node's flags (no duplicates). Returns false if
    /// the node does not exist.
    pub fn flag_node(&mut self, id: &str, tag: &str) -> bool {
        match self.id_index.get(id) {
            Some(&index) => {
                self.graph[index].flag(tag);
                true
            }
            None => false,
        }
    }

    /// Appends a tag to an edge's flags (no duplicates). Returns false if
    /// the edge does not exist.
    pub fn flag_edge(&mut self, source: &str, target: &str, tag: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.id_index.get(source), self.id_index.get(target))
        else {
            return false;
        };
        match self.graph.find_edge(from, to) {
            Some(index) => {
                self.graph[index].flag(tag);
                true
            }
            None => false,
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &DepNode> {
        self.graph.node_weights()
    }

    /// Iterates over all edges as `(source_id, target_id, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &DepEdge)> + '_ {
        self.graph.edge_references().map(|edge_ref| {
            let source = self.graph[edge_ref.source()].id.as_str();
            let target = self.graph[edge_ref.target()].id.as_str();
            (source, target, edge_ref.weight())
        })
    }

    /// Immediate neighbors in one direction, as canonical ids.
    pub fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&index) = self.id_index.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(index, direction)
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }

    /// Total degree (incoming plus outgoing edges) of a node.
    pub fn degree(&self, id: &str) -> usize {
        let Some(&index) = self.id_index.get(id) else {
            return 0;
        };
        self.graph.edges_directed(index, Direction::Incoming).count()
            + self.graph.edges_directed(index, Direction::Outgoing).count()
    }

    /// Builds the subgraph induced by `keep`: the kept nodes plus every
    /// edge whose both endpoints are kept. Attributes are preserved.
    pub fn induced_subgraph(&self, keep: &HashSet<&str>) -> DepGraph {
        let mut sub = DepGraph::new();
        for node in self.nodes() {
            if keep.contains(node.id.as_str()) {
                sub.add_node(node.clone());
            }
        }
        for (source, target, edge) in self.edges() {
            if keep.contains(source) && keep.contains(target) {
                sub.add_edge(source, target, edge.clone());
            }
        }
        sub
    }

    /// Builds a new graph with all nodes but only the edges matching the
    /// predicate. Isolated nodes survive.
    pub fn retain_edges_by(&self, mut predicate: impl FnMut(&DepEdge) -> bool) -> DepGraph {
        let mut out = DepGraph::new();
        for node in self.nodes() {
            out.add_node(node.clone());
        }
        for (source, target, edge) in self.edges() {
            if predicate(edge) {
                out.add_edge(source, target, edge.clone());
            }
        }
        out
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let files = self.nodes().filter(|n| n.kind == NodeKind::File).count();
        let functions = self
            .nodes()
            .filter(|n| n.kind == NodeKind::Function)
            .count();
        let contains = self
            .edges()
            .filter(|(_, _, e)| e.kind == EdgeKind::Contains)
            .count();
        let imports = self
            .edges()
            .filter(|(_, _, e)| e.kind == EdgeKind::Imports)
            .count();

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            files,
            functions,
            contains,
            imports,
        }
    }
}

/// Counts by node and edge kind, for summaries.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub files: usize,
    pub functions: usize,
    pub contains: usize,
    pub imports: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::IN_CYCLE;

    #[test]
    fn test_readd_merges_instead_of_duplicating() {
        let mut graph = DepGraph::new();
        let mut flagged = DepNode::file("a.py", "a.py");
        flagged.flag(IN_CYCLE);

        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(flagged);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get("a.py").unwrap().flags, vec![IN_CYCLE]);
    }

    #[test]
    fn test_edge_requires_both_endpoints() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));

        assert!(!graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_edge_is_folded() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(DepNode::file("b.py", "b.py"));

        assert!(graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports)));
        assert!(graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports)));

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_degree_counts_both_directions() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(DepNode::file("b.py", "b.py"));
        graph.add_node(DepNode::file("c.py", "c.py"));
        graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports));
        graph.add_edge("c.py", "b.py", DepEdge::new(EdgeKind::Imports));

        assert_eq!(graph.degree("b.py"), 2);
        assert_eq!(graph.degree("a.py"), 1);
        assert_eq!(graph.degree("missing"), 0);
    }

    #[test]
    fn test_induced_subgraph_keeps_inner_edges_only() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(DepNode::file("b.py", "b.py"));
        graph.add_node(DepNode::file("c.py", "c.py"));
        graph.add_edge("a.py", "b.py", DepEdge::new(EdgeKind::Imports));
        graph.add_edge("b.py", "c.py", DepEdge::new(EdgeKind::Imports));

        let keep: HashSet<&str> = ["a.py", "b.py"].into_iter().collect();
        let sub = graph.induced_subgraph(&keep);

        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        assert!(sub.has_edge("a.py", "b.py"));
        assert!(!sub.contains("c.py"));
    }

    #[test]
    fn test_retain_edges_keeps_isolated_nodes() {
        let mut graph = DepGraph::new();
        graph.add_node(DepNode::file("a.py", "a.py"));
        graph.add_node(DepNode::function("a.py::f", "f"));
        graph.add_edge("a.py", "a.py::f", DepEdge::new(EdgeKind::Contains));

        let out = graph.retain_edges_by(|e| e.kind == EdgeKind::Imports);

        assert_eq!(out.node_count(), 2);
        assert_eq!(out.edge_count(), 0);
    }
}

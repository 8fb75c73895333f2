//! Simple-cycle detection and flagging.
//!
//! Enumerates every simple directed cycle in the graph (self-loops
//! included) and tags participating nodes and edges with `in_cycle`. The
//! enumeration is a DFS backtracking search rooted at each cycle's minimum
//! vertex: for root r only vertices >= r are explored, so each elementary
//! circuit is emitted exactly once. This is equivalent in output to
//! Johnson's algorithm; the order of returned cycles is unspecified.
//!
//! Elementary-circuit enumeration is exponential in the worst case. That is
//! a known scalability boundary, not a bug: developer codebases of typical
//! size (hundreds of files) are fine, and [`CycleLimits`] refuses to
//! enumerate beyond a configurable graph size instead of silently
//! truncating.

use crate::error::GraphError;
use crate::graph::DepGraph;
use crate::node::IN_CYCLE;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

/// Size guard for cycle enumeration. A zero field means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct CycleLimits {
    pub max_nodes: usize,
    pub max_edges: usize,
}

impl CycleLimits {
    /// No limits; enumerate regardless of graph size.
    pub const UNBOUNDED: CycleLimits = CycleLimits {
        max_nodes: 0,
        max_edges: 0,
    };
}

impl Default for CycleLimits {
    fn default() -> Self {
        Self {
            max_nodes: 2_000,
            max_edges: 10_000,
        }
    }
}

/// Finds all simple cycles and flags their nodes and edges.
///
/// Each returned cycle is an ordered node-id sequence `[n0, ..., nk-1]`
/// with a directed edge from every element to its successor, wrapping from
/// last to first; a one-element cycle is a self-loop. Flags are applied
/// with the no-duplicate rule, so repeated detection never stacks tags.
///
/// # Errors
///
/// Returns [`GraphError::TooLargeForCycles`] when the graph exceeds
/// `limits`; the graph itself is left untouched and still usable.
pub fn detect_cycles(
    graph: &mut DepGraph,
    limits: &CycleLimits,
) -> Result<Vec<Vec<String>>, GraphError> {
    let nodes = graph.node_count();
    let edges = graph.edge_count();
    if (limits.max_nodes > 0 && nodes > limits.max_nodes)
        || (limits.max_edges > 0 && edges > limits.max_edges)
    {
        return Err(GraphError::TooLargeForCycles { nodes, edges });
    }

    let cycles = simple_cycles(graph);
    debug!(cycles = cycles.len(), "cycle enumeration finished");

    for cycle in &cycles {
        for id in cycle {
            graph.flag_node(id, IN_CYCLE);
        }
        for i in 0..cycle.len() {
            let source = &cycle[i];
            let target = &cycle[(i + 1) % cycle.len()];
            if graph.has_edge(source, target) {
                graph.flag_edge(source, target, IN_CYCLE);
            }
        }
    }

    Ok(cycles)
}

/// Enumerates all elementary circuits as id sequences.
fn simple_cycles(graph: &DepGraph) -> Vec<Vec<String>> {
    let indices: Vec<_> = graph.graph.node_indices().collect();
    let n = indices.len();

    let mut position = HashMap::with_capacity(n);
    for (pos, &index) in indices.iter().enumerate() {
        position.insert(index, pos);
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge_ref in graph.graph.edge_references() {
        adjacency[position[&edge_ref.source()]].push(position[&edge_ref.target()]);
    }
    for successors in &mut adjacency {
        successors.sort_unstable();
        successors.dedup();
    }

    let mut cycles = Vec::new();
    let mut path = Vec::new();
    let mut on_path = vec![false; n];

    for root in 0..n {
        circuit(root, root, &adjacency, &mut path, &mut on_path, &mut cycles);
    }

    cycles
        .into_iter()
        .map(|cycle| {
            cycle
                .into_iter()
                .map(|pos| graph.graph[indices[pos]].id.clone())
                .collect()
        })
        .collect()
}

/// Backtracking search for circuits through `root` using vertices >= root.
fn circuit(
    v: usize,
    root: usize,
    adjacency: &[Vec<usize>],
    path: &mut Vec<usize>,
    on_path: &mut [bool],
    cycles: &mut Vec<Vec<usize>>,
) {
    path.push(v);
    on_path[v] = true;

    for &w in &adjacency[v] {
        if w < root {
            continue;
        }
        if w == root {
            cycles.push(path.clone());
        } else if !on_path[w] {
            circuit(w, root, adjacency, path, on_path, cycles);
        }
    }

    path.pop();
    on_path[v] = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{DepEdge, EdgeKind};
    use crate::node::DepNode;
    use std::collections::HashSet;

    fn graph_of(edges: &[(&str, &str)]) -> DepGraph {
        let mut graph = DepGraph::new();
        let mut seen = HashSet::new();
        for &(a, b) in edges {
            for id in [a, b] {
                if seen.insert(id) {
                    graph.add_node(DepNode::file(id, id));
                }
            }
            graph.add_edge(a, b, DepEdge::new(EdgeKind::Imports));
        }
        graph
    }

    /// Normalizes a cycle to its rotation starting at the smallest id, so
    /// assertions are independent of where enumeration happened to start.
    fn canonical(cycle: &[String]) -> Vec<String> {
        let start = cycle
            .iter()
            .enumerate()
            .min_by_key(|(_, id)| id.as_str())
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut rotated = cycle[start..].to_vec();
        rotated.extend_from_slice(&cycle[..start]);
        rotated
    }

    #[test]
    fn test_dag_has_no_cycles() {
        let mut graph = graph_of(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();
        assert!(cycles.is_empty());
        assert!(graph.nodes().all(|n| n.flags.is_empty()));
    }

    #[test]
    fn test_triangle_is_one_cycle_with_flags() {
        let mut graph = graph_of(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
        assert_eq!(canonical(&cycles[0]), vec!["a", "b", "c"]);

        for id in ["a", "b", "c"] {
            assert_eq!(graph.get(id).unwrap().flags, vec![IN_CYCLE]);
        }
        for (source, target) in [("a", "b"), ("b", "c"), ("c", "a")] {
            assert!(graph.edge(source, target).unwrap().in_cycle());
        }
    }

    #[test]
    fn test_every_consecutive_pair_is_a_real_edge() {
        let mut graph = graph_of(&[
            ("a", "b"),
            ("b", "a"),
            ("b", "c"),
            ("c", "a"),
            ("d", "d"),
        ]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert!(!cycles.is_empty());
        for cycle in &cycles {
            for i in 0..cycle.len() {
                let source = &cycle[i];
                let target = &cycle[(i + 1) % cycle.len()];
                assert!(
                    graph.has_edge(source, target),
                    "{source} -> {target} missing"
                );
            }
        }
    }

    #[test]
    fn test_self_loop_is_a_length_one_cycle() {
        let mut graph = graph_of(&[("a", "a"), ("a", "b")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["a"]);
        assert!(graph.edge("a", "a").unwrap().in_cycle());
        assert!(!graph.edge("a", "b").unwrap().in_cycle());
        assert!(graph.get("b").unwrap().flags.is_empty());
    }

    #[test]
    fn test_two_disjoint_cycles() {
        let mut graph = graph_of(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert_eq!(cycles.len(), 2);
        let sets: HashSet<Vec<String>> = cycles.iter().map(|c| canonical(c)).collect();
        assert!(sets.contains(&vec!["a".to_string(), "b".to_string()]));
        assert!(sets.contains(&vec!["c".to_string(), "d".to_string()]));
    }

    #[test]
    fn test_overlapping_cycles_all_found() {
        // a -> b -> a and a -> b -> c -> a share the a-b edge.
        let mut graph = graph_of(&[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert_eq!(cycles.len(), 2);
        let lengths: Vec<usize> = {
            let mut l: Vec<usize> = cycles.iter().map(|c| c.len()).collect();
            l.sort_unstable();
            l
        };
        assert_eq!(lengths, vec![2, 3]);
    }

    #[test]
    fn test_repeated_detection_does_not_duplicate_flags() {
        let mut graph = graph_of(&[("a", "b"), ("b", "a")]);
        detect_cycles(&mut graph, &CycleLimits::default()).unwrap();
        detect_cycles(&mut graph, &CycleLimits::default()).unwrap();

        assert_eq!(graph.get("a").unwrap().flags, vec![IN_CYCLE]);
        assert_eq!(graph.edge("a", "b").unwrap().flags, vec![IN_CYCLE]);
    }

    #[test]
    fn test_size_guard_trips_recoverably() {
        let mut graph = graph_of(&[("a", "b"), ("b", "a")]);
        let limits = CycleLimits {
            max_nodes: 1,
            max_edges: 0,
        };

        let err = detect_cycles(&mut graph, &limits);
        assert!(matches!(
            err,
            Err(GraphError::TooLargeForCycles { nodes: 2, .. })
        ));
        // Graph untouched and still usable.
        assert!(graph.get("a").unwrap().flags.is_empty());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_unbounded_limits_always_enumerate() {
        let mut graph = graph_of(&[("a", "b"), ("b", "a")]);
        let cycles = detect_cycles(&mut graph, &CycleLimits::UNBOUNDED).unwrap();
        assert_eq!(cycles.len(), 1);
    }
}

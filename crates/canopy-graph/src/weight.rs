//! Edge weight normalization.
//!
//! Raw relationship multiplicity is folded into a 1-10 scale so renderers
//! can map weight to visual emphasis without knowing absolute counts. The
//! builder currently stores at most one edge per ordered pair, which makes
//! every per-pair count 1 and lands every edge on the midpoint weight; the
//! normalization is kept general so a multiplicity-aware builder would not
//! change this module.

use crate::graph::DepGraph;
use std::collections::HashMap;

/// Weight assigned when all pairs are equally frequent.
const UNIFORM_WEIGHT: f64 = 5.0;

/// Recomputes every edge weight from the current edge set, in place.
///
/// Counts relationship instances per ordered `(source, target)` pair, then
/// maps counts linearly onto `[1, 10]`. When all pairs tie the midpoint 5
/// is used. Weights are derived from the current edges only, so the
/// computation is idempotent. An empty edge set is a no-op.
pub fn compute_edge_weights(graph: &mut DepGraph) {
    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    for (source, target, _) in graph.edges() {
        *counts
            .entry((source.to_string(), target.to_string()))
            .or_insert(0) += 1;
    }

    if counts.is_empty() {
        return;
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let min = counts.values().copied().min().unwrap_or(0);

    let edge_indices: Vec<_> = graph.graph.edge_indices().collect();
    for index in edge_indices {
        let (from, to) = match graph.graph.edge_endpoints(index) {
            Some(endpoints) => endpoints,
            None => continue,
        };
        let key = (graph.graph[from].id.clone(), graph.graph[to].id.clone());
        let count = counts.get(&key).copied().unwrap_or(1);
        graph.graph[index].weight = scaled_weight(count, min, max);
    }
}

/// Linear 1-10 scale; collapses to the midpoint when the distribution has
/// no spread.
fn scaled_weight(count: usize, min: usize, max: usize) -> f64 {
    if max == min {
        UNIFORM_WEIGHT
    } else {
        1.0 + 9.0 * (count - min) as f64 / (max - min) as f64
    }
}

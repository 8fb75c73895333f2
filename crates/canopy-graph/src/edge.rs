//! Edge types for the dependency graph.
//!
//! The graph is directed and holds at most one edge per ordered
//! `(source, target)` pair; relationship multiplicity is folded into the
//! edge weight rather than stored as parallel edges.

use crate::node::IN_CYCLE;
use serde::{Deserialize, Serialize};

/// The kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// File defines a function.
    Contains,

    /// File depends on another file (inferred).
    Imports,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Contains => "contains",
            Self::Imports => "imports",
        };
        write!(f, "{}", s)
    }
}

/// Attributes of a directed edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepEdge {
    /// The kind of relationship.
    pub kind: EdgeKind,

    /// Normalized relationship weight in `[1, 10]`; 1 until computed.
    pub weight: f64,

    /// Append-only tag set, same rules as node flags.
    pub flags: Vec<String>,
}

impl DepEdge {
    /// Creates an edge with the default weight.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            weight: 1.0,
            flags: Vec::new(),
        }
    }

    /// Appends a tag unless it is already present.
    pub fn flag(&mut self, tag: &str) {
        if !self.flags.iter().any(|t| t == tag) {
            self.flags.push(tag.to_string());
        }
    }

    /// True if this edge lies on a detected cycle.
    pub fn in_cycle(&self) -> bool {
        self.flags.iter().any(|t| t == IN_CYCLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight() {
        let edge = DepEdge::new(EdgeKind::Imports);
        assert_eq!(edge.weight, 1.0);
        assert!(!edge.in_cycle());
    }

    #[test]
    fn test_flag_idempotent() {
        let mut edge = DepEdge::new(EdgeKind::Contains);
        edge.flag(IN_CYCLE);
        edge.flag(IN_CYCLE);
        assert_eq!(edge.flags.len(), 1);
        assert!(edge.in_cycle());
    }
}

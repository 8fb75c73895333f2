//! Node types for the dependency graph.

use serde::{Deserialize, Serialize};

/// Tag applied to nodes and edges that participate in a detected cycle.
pub const IN_CYCLE: &str = "in_cycle";

/// The kind of entity a node represents.
///
/// Deliberately small; further kinds (classes, event handlers, ...) slot in
/// without touching the graph machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A source file.
    File,

    /// A function defined inside a file.
    Function,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Function => "function",
        };
        write!(f, "{}", s)
    }
}

/// A node in the dependency graph.
///
/// Identity is the canonical string id: a file's path, or
/// `<file-path>::<function-name>` for a function. The id stays stable for
/// joins and lookups; human-readable labels are derived separately at
/// display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepNode {
    /// Canonical id, unique within a graph.
    pub id: String,

    /// What this node represents.
    pub kind: NodeKind,

    /// Human-facing name (file name or function name); not unique.
    pub name: String,

    /// Append-only tag set; never holds the same tag twice.
    pub flags: Vec<String>,
}

impl DepNode {
    /// Creates a file node.
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::File, name)
    }

    /// Creates a function node.
    pub fn function(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Function, name)
    }

    fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            flags: Vec::new(),
        }
    }

    /// Appends a tag unless it is already present.
    pub fn flag(&mut self, tag: &str) {
        if !self.flags.iter().any(|t| t == tag) {
            self.flags.push(tag.to_string());
        }
    }
}

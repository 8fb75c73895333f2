//! Error types for the graph engine.

use thiserror::Error;

/// Errors produced while building or analyzing a dependency graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The cycle-analysis size guard tripped. Recoverable: callers keep the
    /// graph and treat the cycle list as empty.
    #[error("graph too large for cycle analysis ({nodes} nodes, {edges} edges)")]
    TooLargeForCycles { nodes: usize, edges: usize },

    /// Scanning the source directory failed before a graph could be built.
    #[error(transparent)]
    Scan(#[from] canopy_core::ScanError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

//! Canopy Graph - Code dependency graph engine
//!
//! Turns per-file analysis records into a directed, attributed graph of
//! files and functions, then post-processes it: normalized edge weights,
//! simple-cycle detection and flagging, composable view filters, and a
//! serialized export with human-readable display labels.
//!
//! # Architecture
//!
//! The engine is a stateless pipeline of transformations over an explicit
//! [`DepGraph`] value:
//!
//! - [`GraphBuilder`] / [`build_graph`] - records in, graph out
//! - [`compute_edge_weights`] - folds relationship frequency onto a 1-10
//!   scale, in place
//! - [`detect_cycles`] - enumerates simple cycles and flags members
//! - [`apply_filters`] - derives a reduced view as a new graph
//! - [`to_graph_data`] - serializable output with shortened labels
//!
//! [`analyze_directory`] strings the stages together for the common case.
//!
//! # Example
//!
//! ```no_run
//! use canopy_graph::{analyze_directory, AnalysisOptions};
//! use std::path::Path;
//!
//! let data = analyze_directory(Path::new("./my-project"), &AnalysisOptions::default())?;
//! println!("{} nodes, {} cycles", data.nodes.len(), data.cycles.len());
//! # Ok::<(), canopy_graph::GraphError>(())
//! ```

mod builder;
mod cycles;
mod display;
mod edge;
mod error;
mod export;
mod filter;
mod graph;
mod node;
mod pipeline;
mod weight;

pub use builder::{build_graph, GraphBuilder};
pub use cycles::{detect_cycles, CycleLimits};
pub use display::shorten_path;
pub use edge::{DepEdge, EdgeKind};
pub use error::{GraphError, Result};
pub use export::{
    to_graph_data, CycleData, EdgeData, GraphData, NodeData, LARGE_GRAPH_THRESHOLD,
    LARGE_GRAPH_WARNING,
};
pub use filter::{apply_filters, FilterConfig};
pub use graph::{DepGraph, GraphStats};
pub use node::{DepNode, NodeKind, IN_CYCLE};
pub use pipeline::{analyze_directory, analyze_records, AnalysisOptions};
pub use weight::compute_edge_weights;

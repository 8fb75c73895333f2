//! Canopy Core - Source scanning and per-file analysis
//!
//! This crate produces the raw material the graph engine works from: one
//! [`FileRecord`] per analyzed source file, listing the functions defined in
//! it together with line ranges, parameters and a complexity estimate.
//!
//! # Architecture
//!
//! - [`FileAnalyzer`] parses a single file with Tree-sitter and extracts
//!   its function inventory.
//! - [`scan_directory`] walks a source tree (gitignore-aware), runs the
//!   analyzer over every recognized file and collects the records.
//!
//! Per-file failures never abort a scan; they are logged and the file is
//! skipped.

mod analyzer;
mod error;
mod record;
mod scanner;

pub use analyzer::{FileAnalyzer, RECOGNIZED_EXTENSIONS};
pub use error::{Result, ScanError};
pub use record::{FileRecord, FunctionRecord};
pub use scanner::scan_directory;

//! Per-file analysis records.
//!
//! These are the records the graph engine consumes. One `FileRecord` per
//! analyzed source file, one `FunctionRecord` per function found in it.
//! Both serialize cleanly so records can also be supplied as JSON by other
//! producers instead of the built-in scanner.

use serde::{Deserialize, Serialize};

/// Analysis result for a single source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Filesystem path of the file; doubles as the graph node id.
    pub path: String,

    /// Base file name, e.g. `utils.py`.
    pub name: String,

    /// Functions defined in this file.
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
}

impl FileRecord {
    /// Creates a record with no functions.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// The file name without its extension, used by import inference.
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

/// A single function found in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function or method name.
    pub name: String,

    /// 1-based line of the definition.
    pub start_line: u32,

    /// 1-based line where the definition ends.
    pub end_line: u32,

    /// Branch-counting cyclomatic complexity estimate.
    pub complexity: u32,

    /// Declared parameter names.
    #[serde(default)]
    pub parameters: Vec<String>,
}

//! Directory scanning.
//!
//! Walks a source tree, runs the [`FileAnalyzer`] on every recognized file
//! and collects the per-file records. Per-file failures are logged and
//! skipped; they never abort the scan.

use crate::analyzer::FileAnalyzer;
use crate::error::{Result, ScanError};
use crate::record::FileRecord;
use ignore::WalkBuilder;
use std::path::Path;
use tracing::{debug, info, warn};

/// Directory names that never contain analyzable first-party source.
const PRUNED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    "__pycache__",
    "venv",
    ".venv",
    "site-packages",
    "vendor",
];

/// Scans `root` and returns one record per analyzable source file.
///
/// The walk respects `.gitignore`, skips hidden files and conventional
/// build/dependency directories. Records come back sorted by path so
/// downstream output is deterministic.
///
/// # Errors
///
/// Returns [`ScanError::DirectoryNotFound`] if `root` does not exist.
/// Individual file failures (unreadable, empty, parse trouble) are logged
/// at `warn` and the file is skipped.
pub fn scan_directory(root: &Path) -> Result<Vec<FileRecord>> {
    if !root.exists() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut analyzer = FileAnalyzer::new()?;
    let mut records = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            !PRUNED_DIRS.contains(&name.as_str())
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        if !FileAnalyzer::supports(path) {
            continue;
        }

        debug!(path = %path.display(), "analyzing file");
        match analyzer.analyze_file(path) {
            Ok(record) => records.push(record),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping file"),
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    info!(files = records.len(), "scan complete");
    Ok(records)
}

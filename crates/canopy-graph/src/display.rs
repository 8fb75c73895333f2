//! Display-name shortening.
//!
//! Canonical node ids are full paths (or `path::function`), which is what
//! joins and lookups need but far too noisy to label a diagram with. This
//! module derives a compact label while leaving the canonical id untouched:
//! the file name plus at most two meaningful parent directories, where
//! conventional build/output/dependency directory names carry no meaning
//! and are skipped.

/// Directory names that add no context to a label.
///
/// Lowercase; covers build output, environments and dependency-manager
/// trees across the ecosystems the scanner recognizes.
const DISREGARDED_SEGMENTS: &[&str] = &[
    "src",
    "lib",
    "app",
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    "target",
    "node_modules",
    "__pycache__",
    "venv",
    ".venv",
    "env",
    "site-packages",
    "vendor",
    "packages",
];

/// How many context segments a label keeps at most.
const CONTEXT_SEGMENTS: usize = 2;

/// Derives a short human-readable label from a path-like id.
///
/// Ids without a separator (bare names, function-id fragments) come back
/// unchanged. Otherwise the label is the file name, optionally prefixed -
/// when `preserve_namespace` is set - by the meaningful directory segments
/// found in the two positions immediately preceding it. Disregarded
/// segments inside that window are dropped rather than widening the walk,
/// so `a/b/src/c/file.py` shortens to `c/file.py`.
pub fn shorten_path(id: &str, preserve_namespace: bool) -> String {
    if !id.contains('/') && !id.contains('\\') {
        return id.to_string();
    }

    let normalized = id.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let Some((&filename, parents)) = segments.split_last() else {
        return id.to_string();
    };

    if !preserve_namespace {
        return filename.to_string();
    }

    let context: Vec<&str> = parents
        .iter()
        .rev()
        .take(CONTEXT_SEGMENTS)
        .filter(|segment| !DISREGARDED_SEGMENTS.contains(&segment.to_lowercase().as_str()))
        .copied()
        .collect();

    if context.is_empty() {
        return filename.to_string();
    }

    // `context` was collected walking backward; restore original order.
    let mut label: Vec<&str> = context.into_iter().rev().collect();
    label.push(filename);
    label.join("/")
}

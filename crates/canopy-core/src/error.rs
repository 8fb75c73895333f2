//! Error types for scanning and per-file analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while scanning a directory or analyzing a single file.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The directory handed to the scanner does not exist.
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of the recognized source languages.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(PathBuf),

    /// The file exists but has no content to analyze.
    #[error("empty file: {0}")]
    EmptyFile(PathBuf),

    /// Tree-sitter failed to configure or produce a parse tree.
    #[error("parser error: {0}")]
    Parser(String),
}

impl ScanError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScanError>;

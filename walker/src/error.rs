//! Error type for walking, hashing, and report writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a scan run.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A file could not be opened or read.
    #[error("cannot access {path}: {source}")]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failure.
    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Report or duplicates file could not be written.
    #[error("cannot write report: {0}")]
    Report(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON write failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The hashing thread pool could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

/// Convenience alias for results with [`WalkError`].
pub type Result<T> = std::result::Result<T, WalkError>;

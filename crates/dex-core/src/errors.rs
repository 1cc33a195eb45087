//! Dump file error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a dump file.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Filesystem failure (create dir, read, write).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dump could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dump root is valid JSON but not an array.
    #[error("expected a JSON array at the root, found {0}")]
    NotAnArray(String),

    /// The dump file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl DumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

//! Error types for chronicle-sync.

use std::path::PathBuf;

use thiserror::Error;

use chronicle_core::GenerateError;

/// All errors that can arise from synchronization.
///
/// The core transforms (sanitize / classify / clean / insert) are total and
/// never fail; only the external generation call and document persistence
/// have error paths.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The external generator failed; no document content was produced.
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

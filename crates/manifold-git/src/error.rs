//! Error types for manifold-git

use std::path::PathBuf;
use std::time::Duration;

/// Result type for manifold-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring a snapshot
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to clone {url}: {source}")]
    Clone {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("Repository {url} has no commits")]
    EmptyRepository { url: String },

    #[error("Branch '{branch}' not found in {url}")]
    BranchNotFound { url: String, branch: String },

    #[error("Clone of {url} was cancelled")]
    Cancelled { url: String },

    #[error("Clone of {url} timed out after {timeout:?}")]
    TimedOut { url: String, timeout: Duration },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

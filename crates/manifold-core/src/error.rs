//! Error types for manifold-core

use crate::resolver::ResolveError;

/// Result type for manifold-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in manifold-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The application's repository could not be snapshotted
    #[error("Failed to acquire repository for application '{app}': {source}")]
    Acquisition {
        app: String,
        #[source]
        source: manifold_git::Error,
    },

    /// One environment's overlay could not be resolved
    #[error(
        "Failed to resolve environment '{environment}' of application '{app}' at {path}: {source}"
    )]
    Resolution {
        app: String,
        environment: String,
        path: String,
        #[source]
        source: ResolveError,
    },

    /// Application declarations are inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No application with this name is declared
    #[error("Application '{name}' not found")]
    AppNotFound { name: String },

    /// The resolution worker pool could not be started
    #[error("Failed to start resolution workers: {message}")]
    WorkerPool { message: String },

    /// Filesystem error from manifold-fs
    #[error(transparent)]
    Fs(#[from] manifold_fs::Error),
}

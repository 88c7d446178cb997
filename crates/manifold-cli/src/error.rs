//! Error types for manifold-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from manifold-core
    #[error(transparent)]
    Core(#[from] manifold_core::Error),

    /// Error from overlay resolution
    #[error(transparent)]
    Resolve(#[from] manifold_core::ResolveError),

    /// Error from manifold-fs
    #[error(transparent)]
    Fs(#[from] manifold_fs::Error),

    /// Output could not be encoded
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

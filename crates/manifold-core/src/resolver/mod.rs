//! Overlay resolution
//!
//! An [`OverlayResolver`] takes a filesystem and a directory holding an
//! overlay description and returns the fully resolved documents. The
//! aggregation pipeline only depends on this trait, so any engine that can
//! read through [`FileSystem`] can be plugged in.

mod image;
mod kustomization;
mod kustomize;
mod transform;

pub use image::ImageRef;
pub use kustomization::{ImageOverride, KUSTOMIZATION_FILES, Kustomization};
pub use kustomize::KustomizeResolver;

use manifold_fs::{FileSystem, NormalizedPath};

use crate::resource::{ResolvedResource, ResourceId};

/// Resolves the overlay at a directory into manifest documents.
///
/// Implementations must only read through `fs` and must be safe to call
/// concurrently on distinct directories of the same filesystem.
pub trait OverlayResolver: Send + Sync {
    fn resolve(
        &self,
        fs: &dyn FileSystem,
        dir: &NormalizedPath,
    ) -> Result<Vec<ResolvedResource>, ResolveError>;
}

impl<R: OverlayResolver + ?Sized> OverlayResolver for &R {
    fn resolve(
        &self,
        fs: &dyn FileSystem,
        dir: &NormalizedPath,
    ) -> Result<Vec<ResolvedResource>, ResolveError> {
        (**self).resolve(fs, dir)
    }
}

impl<R: OverlayResolver + ?Sized> OverlayResolver for Box<R> {
    fn resolve(
        &self,
        fs: &dyn FileSystem,
        dir: &NormalizedPath,
    ) -> Result<Vec<ResolvedResource>, ResolveError> {
        (**self).resolve(fs, dir)
    }
}

/// Why an overlay could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{path} is not a directory")]
    NotADirectory { path: NormalizedPath },

    #[error("No kustomization file found in {dir}")]
    MissingKustomization { dir: NormalizedPath },

    #[error("Resource '{entry}' referenced from {file} does not exist")]
    MissingResource { file: NormalizedPath, entry: String },

    #[error("Remote resource '{entry}' referenced from {file} is not supported")]
    RemoteResource { file: NormalizedPath, entry: String },

    #[error("Kustomization cycle: {chain}")]
    Cycle { chain: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: NormalizedPath, message: String },

    #[error("Invalid document in {path}: {message}")]
    InvalidDocument { path: NormalizedPath, message: String },

    #[error("Resource {id} is declared more than once under {file}")]
    DuplicateResource { id: ResourceId, file: NormalizedPath },

    #[error("Field '{field}' in {file} is not supported")]
    UnsupportedField { file: NormalizedPath, field: String },

    /// Failure reported by a resolver other than the built-in one
    #[error("{message}")]
    Engine { message: String },

    #[error(transparent)]
    Fs(#[from] manifold_fs::Error),
}

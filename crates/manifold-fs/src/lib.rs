//! Path handling and filesystem capabilities for Manifold
//!
//! Provides lexically normalized paths, the read-only [`FileSystem`]
//! capability consumed by overlay resolvers, an on-disk backing for it,
//! and format-agnostic config loading.

pub mod config;
pub mod disk;
pub mod error;
pub mod filesystem;
pub mod path;

pub use config::ConfigStore;
pub use disk::DiskFs;
pub use error::{Error, Result};
pub use filesystem::{ConfirmedDir, FileSystem, WalkFn, split_cleaned};
pub use path::NormalizedPath;

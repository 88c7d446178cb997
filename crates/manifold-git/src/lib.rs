//! Repository snapshots for Manifold
//!
//! A [`Snapshot`] is the file tree of one commit, held in memory and never
//! modified after acquisition. [`SnapshotFs`] presents it through the
//! hierarchical [`manifold_fs::FileSystem`] contract, inferring directories
//! from the tracked file paths.

pub mod acquire;
pub mod cancel;
pub mod error;
pub mod snapshot;
pub mod snapshot_fs;

pub use acquire::{CloneOptions, acquire};
pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use snapshot::Snapshot;
pub use snapshot_fs::SnapshotFs;

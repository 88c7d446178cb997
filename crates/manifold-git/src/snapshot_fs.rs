//! Read-only hierarchical filesystem over a snapshot

use std::io::Read;

use manifold_fs::{ConfirmedDir, Error, FileSystem, NormalizedPath, Result, WalkFn, split_cleaned};

use crate::Snapshot;

/// Presents a [`Snapshot`] through the [`FileSystem`] contract.
///
/// Rooted (`/a/b`) and relative (`a/b`) paths address the same entry, since
/// a snapshot has no working directory. Everything except reads is rejected
/// with [`Error::Unsupported`].
#[derive(Debug, Clone, Copy)]
pub struct SnapshotFs<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> SnapshotFs<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Paths above the root have no backing entry.
    fn key(path: &NormalizedPath) -> Option<&str> {
        if path.escapes() {
            None
        } else {
            Some(path.repo_key())
        }
    }
}

impl FileSystem for SnapshotFs<'_> {
    fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        Self::key(path)
            .and_then(|key| self.snapshot.read(key))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::not_found(path))
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        Self::key(path)
            .is_some_and(|key| self.snapshot.contains_file(key) || self.snapshot.is_dir(key))
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        Self::key(path).is_some_and(|key| self.snapshot.is_dir(key))
    }

    fn cleaned_abs(&self, path: &NormalizedPath) -> Result<(ConfirmedDir, String)> {
        Ok(split_cleaned(self, path))
    }

    fn create(&self, _path: &NormalizedPath) -> Result<()> {
        Err(Error::Unsupported { operation: "Create" })
    }

    fn mkdir(&self, _path: &NormalizedPath) -> Result<()> {
        Err(Error::Unsupported { operation: "Mkdir" })
    }

    fn mkdir_all(&self, _path: &NormalizedPath) -> Result<()> {
        Err(Error::Unsupported {
            operation: "MkdirAll",
        })
    }

    fn remove_all(&self, _path: &NormalizedPath) -> Result<()> {
        Err(Error::Unsupported {
            operation: "RemoveAll",
        })
    }

    fn open(&self, _path: &NormalizedPath) -> Result<Box<dyn Read + Send>> {
        Err(Error::Unsupported { operation: "Open" })
    }

    fn glob(&self, _pattern: &str) -> Result<Vec<NormalizedPath>> {
        Err(Error::Unsupported { operation: "Glob" })
    }

    fn write_file(&self, _path: &NormalizedPath, _data: &[u8]) -> Result<()> {
        Err(Error::Unsupported {
            operation: "WriteFile",
        })
    }

    fn read_dir(&self, _path: &NormalizedPath) -> Result<Vec<String>> {
        Err(Error::Unsupported {
            operation: "ReadDir",
        })
    }

    fn walk(&self, _path: &NormalizedPath, _visit: &mut WalkFn<'_>) -> Result<()> {
        Err(Error::Unsupported { operation: "Walk" })
    }
}

//! Filesystem capability consumed by overlay resolvers

use std::io::Read;

use crate::{NormalizedPath, Result};

/// A path confirmed to name a directory by the filesystem that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfirmedDir(NormalizedPath);

impl ConfirmedDir {
    pub fn new(path: NormalizedPath) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &NormalizedPath {
        &self.0
    }

    /// Join a relative entry onto this directory.
    pub fn join(&self, segment: &str) -> NormalizedPath {
        self.0.join(segment)
    }

    pub fn into_inner(self) -> NormalizedPath {
        self.0
    }
}

impl std::fmt::Display for ConfirmedDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Visitor passed to [`FileSystem::walk`]: receives each path and whether it
/// is a directory.
pub type WalkFn<'a> = dyn FnMut(&NormalizedPath, bool) -> Result<()> + 'a;

/// Hierarchical filesystem contract required by overlay resolution.
///
/// Resolution only ever reads. The mutating and enumerating operations are
/// part of the contract so that a backing store can reject them explicitly:
/// the implementations in this workspace return
/// [`Error::Unsupported`](crate::Error::Unsupported) naming the operation and
/// never partially apply anything. [`DiskFs`](crate::DiskFs) is the one
/// exception, it can list directories.
pub trait FileSystem: Send + Sync {
    /// Read the full content of the file at `path`.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when nothing is
    /// stored at exactly that path.
    fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Whether a file or a directory exists at `path`.
    fn exists(&self, path: &NormalizedPath) -> bool;

    /// Whether `path` names a directory.
    fn is_dir(&self, path: &NormalizedPath) -> bool;

    /// Split `path` into a confirmed directory and a leaf name.
    ///
    /// A directory yields `(path, "")`; anything else yields its parent
    /// directory and final element.
    fn cleaned_abs(&self, path: &NormalizedPath) -> Result<(ConfirmedDir, String)>;

    fn create(&self, path: &NormalizedPath) -> Result<()>;

    fn mkdir(&self, path: &NormalizedPath) -> Result<()>;

    fn mkdir_all(&self, path: &NormalizedPath) -> Result<()>;

    fn remove_all(&self, path: &NormalizedPath) -> Result<()>;

    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + Send>>;

    fn glob(&self, pattern: &str) -> Result<Vec<NormalizedPath>>;

    fn write_file(&self, path: &NormalizedPath, data: &[u8]) -> Result<()>;

    /// Names of the entries directly under `path`, sorted.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when `path` is
    /// not a directory.
    fn read_dir(&self, path: &NormalizedPath) -> Result<Vec<String>>;

    fn walk(&self, path: &NormalizedPath, visit: &mut WalkFn<'_>) -> Result<()>;
}

/// Shared `cleaned_abs` logic: directories map to themselves, anything else
/// to `(parent, leaf)`.
pub fn split_cleaned(
    fs: &(impl FileSystem + ?Sized),
    path: &NormalizedPath,
) -> (ConfirmedDir, String) {
    if fs.is_dir(path) {
        return (ConfirmedDir::new(path.clone()), String::new());
    }
    let dir = path.parent().unwrap_or_else(|| path.clone());
    let leaf = path.file_name().unwrap_or_default().to_string();
    (ConfirmedDir::new(dir), leaf)
}

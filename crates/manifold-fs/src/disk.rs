//! Read-only view of a local directory tree

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::filesystem::{WalkFn, split_cleaned};
use crate::{ConfirmedDir, Error, FileSystem, NormalizedPath, Result};

/// A [`FileSystem`] backed by a local directory.
///
/// Relative paths resolve under `root`; rooted paths are used as given.
/// Like the snapshot adapter it never writes, so an overlay tree on disk and
/// one inside a repository snapshot resolve through the same code. Unlike
/// the snapshot adapter it can list a directory.
#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A view rooted at the process working directory.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Ok(Self::new(cwd))
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn native(&self, path: &NormalizedPath) -> PathBuf {
        if path.is_rooted() {
            path.to_native()
        } else {
            self.root.join(path.to_native())
        }
    }
}

impl FileSystem for DiskFs {
    fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let native = self.native(path);
        if !native.is_file() {
            return Err(Error::not_found(path));
        }
        fs::read(&native).map_err(|e| Error::io(native, e))
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        self.native(path).exists()
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        self.native(path).is_dir()
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

    fn read_dir(&self, path: &NormalizedPath) -> Result<Vec<String>> {
        let native = self.native(path);
        if !native.is_dir() {
            return Err(Error::not_found(path));
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::debug!(dir = %path, ?name, "Skipping non UTF-8 entry"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn walk(&self, _path: &NormalizedPath, _visit: &mut WalkFn<'_>) -> Result<()> {
        Err(Error::Unsupported { operation: "Walk" })
    }
}

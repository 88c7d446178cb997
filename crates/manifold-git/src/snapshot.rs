//! Immutable in-memory file tree of one commit

use std::collections::BTreeMap;
use std::ops::Bound;

use manifold_fs::NormalizedPath;

/// The files of one commit, keyed by repository-relative path.
///
/// Only blobs are recorded; directories exist implicitly as prefixes of
/// file paths. The keys live in a sorted map, so a directory lookup is a
/// single range probe rather than a scan of every tracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    commit: String,
    files: BTreeMap<String, Vec<u8>>,
}

impl Snapshot {
    /// Build a snapshot from `(path, content)` pairs.
    ///
    /// Paths are normalized to repository-relative keys; entries that
    /// normalize to the root or climb above it are dropped.
    pub fn from_files<P, C>(
        commit: impl Into<String>,
        files: impl IntoIterator<Item = (P, C)>,
    ) -> Self
    where
        P: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        let files = files
            .into_iter()
            .filter_map(|(path, content)| {
                let normalized = NormalizedPath::new(path.as_ref());
                let key = normalized.repo_key();
                if key.is_empty() || normalized.escapes() {
                    None
                } else {
                    Some((key.to_string(), content.into()))
                }
            })
            .collect();
        Self {
            commit: commit.into(),
            files,
        }
    }

    /// Hex id of the commit this snapshot was taken from.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Number of tracked files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Tracked file paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Whether a file is stored at exactly `key`.
    pub fn contains_file(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    /// Content of the file stored at exactly `key`.
    pub fn read(&self, key: &str) -> Option<&[u8]> {
        self.files.get(key).map(Vec::as_slice)
    }

    /// Whether `key` names a directory.
    ///
    /// True iff no file is stored at exactly `key` and some file path
    /// continues `key` with a `/`. The empty key is the repository root.
    pub fn is_dir(&self, key: &str) -> bool {
        if key.is_empty() {
            return !self.files.is_empty();
        }
        if self.files.contains_key(key) {
            return false;
        }
        let prefix = format!("{key}/");
        // Every key starting with `prefix` sorts at or after it, and any key
        // after it that does not start with it sorts after all that do.
        self.files
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .next()
            .is_some_and(|(path, _)| path.starts_with(&prefix))
    }
}

//! Normalized path handling for repository and on-disk trees

use std::path::{Path, PathBuf};

/// A path normalized to forward slashes and lexically cleaned.
///
/// Cleaning follows the usual shortest-equivalent rules: repeated
/// separators collapse, `.` elements are dropped, `..` removes the
/// preceding element, `..` directly under the root is dropped, and a
/// relative path keeps any leading `..` it cannot resolve. The empty path
/// cleans to `.`.
///
/// No filesystem access is ever performed to build or combine paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes, then cleans the result.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// The repository root.
    pub fn root() -> Self {
        Self {
            inner: "/".to_string(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path starts at the root.
    pub fn is_rooted(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Join this path with a segment and clean the result.
    ///
    /// `base/app` joined with `../dev` yields `base/dev`. A rooted segment
    /// is still appended, never substituted.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if segment_normalized.is_empty() {
            return self.clone();
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment_normalized)),
        }
    }

    /// Get the directory part of the path.
    ///
    /// A bare name has `.` as its parent and a child of the root has `/`.
    /// Returns `None` for `.` and `/`, which have no parent of their own.
    pub fn parent(&self) -> Option<Self> {
        if self.inner == "." || self.inner == "/" {
            return None;
        }
        let inner = match self.inner.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => self.inner[..idx].to_string(),
            None => ".".to_string(),
        };
        Some(Self { inner })
    }

    /// Get the last element of the path.
    pub fn file_name(&self) -> Option<&str> {
        match self.inner.as_str() {
            "." | "/" => None,
            s => s.rsplit('/').next(),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// The root-relative key used to address content inside a repository.
    ///
    /// Strips a leading `/`; both `.` and `/` map to the empty key.
    pub fn repo_key(&self) -> &str {
        match self.inner.as_str() {
            "." | "/" => "",
            s => s.strip_prefix('/').unwrap_or(s),
        }
    }

    /// Whether the path climbs above its starting point (`..` or `../x`).
    pub fn escapes(&self) -> bool {
        self.inner == ".." || self.inner.starts_with("../")
    }
}

/// Lexically clean a forward-slash path.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

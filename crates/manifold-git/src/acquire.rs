//! Snapshot acquisition from a remote repository
//!
//! The remote is cloned bare into a scratch directory, the target commit's
//! tree is read into memory, and the scratch directory is removed before
//! the snapshot is handed back. Nothing outlives the call except the
//! [`Snapshot`] itself.

use std::path::Path;
use std::time::{Duration, Instant};

use git2::build::RepoBuilder;
use git2::{
    ErrorCode, FetchOptions, ObjectType, Oid, RemoteCallbacks, Repository, TreeWalkMode,
    TreeWalkResult,
};

use crate::{CancellationToken, Error, Result, Snapshot};

/// Options controlling how a repository is fetched.
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Remote URL or local path of the repository
    pub url: String,

    /// Branch to snapshot instead of the remote's default branch
    pub branch: Option<String>,

    /// Shallow clone depth; `None` fetches full history
    ///
    /// Ignored for local repositories, whose transport cannot fetch
    /// shallowly.
    pub depth: Option<u32>,

    /// Upper bound on the whole acquisition
    ///
    /// Checked between steps and whenever libgit2 reports progress. A
    /// remote that stalls while connecting reports nothing, so the bound
    /// only takes effect once the connection is up.
    pub timeout: Option<Duration>,

    /// Caller-held cancellation signal
    pub cancel: Option<CancellationToken>,
}

impl CloneOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Interruption state observed throughout one acquisition.
struct Interrupt<'a> {
    opts: &'a CloneOptions,
    deadline: Option<Instant>,
}

impl<'a> Interrupt<'a> {
    fn new(opts: &'a CloneOptions) -> Self {
        Self {
            opts,
            deadline: opts.timeout.map(|t| Instant::now() + t),
        }
    }

    fn is_set(&self) -> bool {
        self.opts.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn check(&self) -> Result<()> {
        if self.opts.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::Cancelled {
                url: self.opts.url.clone(),
            });
        }
        if let (Some(deadline), Some(timeout)) = (self.deadline, self.opts.timeout)
            && Instant::now() >= deadline
        {
            return Err(Error::TimedOut {
                url: self.opts.url.clone(),
                timeout,
            });
        }
        Ok(())
    }
}

/// Fetch `opts.url` and snapshot the tip of its default branch (or
/// `opts.branch`).
///
/// Returns a snapshot only when every step succeeded and the acquisition was
/// neither cancelled nor timed out.
pub fn acquire(opts: &CloneOptions) -> Result<Snapshot> {
    let interrupt = Interrupt::new(opts);
    interrupt.check()?;

    let scratch = tempfile::Builder::new()
        .prefix("manifold-clone-")
        .tempdir()
        .map_err(|source| Error::Io {
            path: std::env::temp_dir(),
            source,
        })?;

    tracing::debug!(url = %opts.url, depth = ?opts.depth, "Cloning repository");
    let repo = clone_bare(opts, &interrupt, scratch.path())?;
    interrupt.check()?;

    let commit = resolve_commit(&repo, opts)?;
    let files = read_tree(&repo, &commit.tree()?, &interrupt)?;
    interrupt.check()?;

    let snapshot = Snapshot::from_files(commit.id().to_string(), files);
    tracing::info!(
        url = %opts.url,
        commit = %snapshot.commit(),
        files = snapshot.len(),
        "Acquired snapshot"
    );
    Ok(snapshot)
}

fn clone_bare(opts: &CloneOptions, interrupt: &Interrupt<'_>, into: &Path) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(|_| !interrupt.is_set());
    callbacks.sideband_progress(|_| !interrupt.is_set());

    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(callbacks);
    match opts.depth {
        Some(depth) if is_local(&opts.url) => {
            tracing::debug!(url = %opts.url, depth, "Local transport, fetching full history");
        }
        Some(depth) => {
            fetch.depth(i32::try_from(depth).unwrap_or(i32::MAX));
        }
        None => {}
    }

    let mut builder = RepoBuilder::new();
    builder.bare(true).fetch_options(fetch);
    if let Some(branch) = &opts.branch {
        builder.branch(branch);
    }

    builder.clone(&opts.url, into).map_err(|source| {
        if let Err(interrupted) = interrupt.check() {
            return interrupted;
        }
        match &opts.branch {
            Some(branch) if source.code() == ErrorCode::NotFound => Error::BranchNotFound {
                url: opts.url.clone(),
                branch: branch.clone(),
            },
            _ => Error::Clone {
                url: opts.url.clone(),
                source,
            },
        }
    })
}

/// Whether `url` is served by libgit2's local transport.
fn is_local(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).exists()
}

fn resolve_commit<'r>(repo: &'r Repository, opts: &CloneOptions) -> Result<git2::Commit<'r>> {
    let empty = || Error::EmptyRepository {
        url: opts.url.clone(),
    };
    if repo.is_empty()? {
        return Err(empty());
    }
    let head = repo.head().map_err(|e| match e.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => empty(),
        _ => Error::Git(e),
    })?;
    Ok(head.peel_to_commit()?)
}

fn read_tree(
    repo: &Repository,
    tree: &git2::Tree<'_>,
    interrupt: &Interrupt<'_>,
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut blobs: Vec<(String, Oid)> = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |root, entry| {
        if entry.kind() == Some(ObjectType::Blob) {
            match entry.name() {
                Some(name) => blobs.push((format!("{root}{name}"), entry.id())),
                None => tracing::debug!(dir = %root, "Skipping entry with non UTF-8 name"),
            }
        }
        TreeWalkResult::Ok
    })?;

    let mut files = Vec::with_capacity(blobs.len());
    for (path, id) in blobs {
        interrupt.check()?;
        let blob = repo.find_blob(id)?;
        files.push((path, blob.content().to_vec()));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_transport_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        assert!(is_local(&path));
        assert!(is_local(&format!("file://{path}")));
        assert!(!is_local("https://github.com/org/repo.git"));
        assert!(!is_local("git@github.com:org/repo.git"));
    }
}

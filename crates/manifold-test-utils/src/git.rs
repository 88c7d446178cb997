//! Git repositories with committed content.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A real git repository in a temporary directory.
///
/// Realism level: **REAL WITH HISTORY** once [`TestRepo::commit`] has been
/// called; an empty repository (unborn `main`) before that.
///
/// # Example
///
/// ```rust,no_run
/// use manifold_test_utils::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.write("base/kustomization.yaml", "resources: []\n");
/// let commit = repo.commit("Initial commit");
/// assert_eq!(commit.len(), 40);
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
    repo: Repository,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Initialise an empty repository whose HEAD is `refs/heads/main`.
    ///
    /// # Panics
    /// Panics if the temporary directory or repository cannot be created.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(temp_dir.path(), &opts).unwrap_or_else(|e| {
            panic!(
                "TestRepo::new: failed to init repository at {}: {e}",
                temp_dir.path().display()
            )
        });
        Self { temp_dir, repo }
    }

    /// Initialise a repository and commit `files` in a single commit.
    pub fn with_files<P: AsRef<str>, C: AsRef<str>>(
        files: impl IntoIterator<Item = (P, C)>,
    ) -> Self {
        let repo = Self::new();
        for (path, content) in files {
            repo.write(path.as_ref(), content.as_ref());
        }
        repo.commit("Initial commit");
        repo
    }

    /// Return the working directory of the repository.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The URL to clone this repository from.
    pub fn url(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap_or_else(|e| {
            panic!("TestRepo::write: failed to write {}: {e}", full_path.display())
        });
        self
    }

    /// Remove `path` (file or directory) from the working directory.
    pub fn remove(&self, path: &str) -> &Self {
        let full_path = self.root().join(path);
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path).unwrap();
        } else {
            fs::remove_file(&full_path).unwrap();
        }
        self
    }

    /// Stage every change in the working directory and commit it on the
    /// current branch. Returns the new commit id.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn commit(&self, message: &str) -> String {
        let mut index = self.repo.index().unwrap();
        index.add_all(["*"], IndexAddOption::DEFAULT, None).unwrap();
        index.update_all(["*"], None).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test User", "test@test.com").unwrap();

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap_or_else(|e| panic!("TestRepo::commit: failed to commit: {e}"))
            .to_string()
    }

    /// Create a branch at the current HEAD commit.
    pub fn branch(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).unwrap();
    }
}

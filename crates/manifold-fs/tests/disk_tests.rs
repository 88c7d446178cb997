//! Tests for the on-disk FileSystem backing

use manifold_fs::{DiskFs, FileSystem, NormalizedPath};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, DiskFs) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("base")).unwrap();
    fs::write(dir.path().join("base/kustomization.yaml"), "resources: []\n").unwrap();
    let disk = DiskFs::new(dir.path());
    (dir, disk)
}

#[test]
fn test_read_file_relative_to_root() {
    let (_dir, disk) = setup();
    let content = disk.read_file(&NormalizedPath::new("base/kustomization.yaml")).unwrap();
    assert_eq!(content, b"resources: []\n");
}

#[test]
fn test_read_missing_file_is_not_found() {
    let (_dir, disk) = setup();
    let err = disk.read_file(&NormalizedPath::new("base/missing.yaml")).unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err}");
}

#[test]
fn test_read_directory_is_not_found() {
    let (_dir, disk) = setup();
    let err = disk.read_file(&NormalizedPath::new("base")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_is_dir_and_exists() {
    let (_dir, disk) = setup();
    assert!(disk.is_dir(&NormalizedPath::new("base")));
    assert!(!disk.is_dir(&NormalizedPath::new("base/kustomization.yaml")));
    assert!(disk.exists(&NormalizedPath::new("base/kustomization.yaml")));
    assert!(!disk.exists(&NormalizedPath::new("overlays")));
}

#[test]
fn test_rooted_paths_are_used_as_given() {
    let (dir, disk) = setup();
    let absolute = NormalizedPath::new(dir.path().join("base"));
    assert!(disk.is_dir(&absolute));
}

#[test]
fn test_cleaned_abs_splits_files() {
    let (_dir, disk) = setup();
    let (dir, leaf) = disk
        .cleaned_abs(&NormalizedPath::new("base/kustomization.yaml"))
        .unwrap();
    assert_eq!(dir.as_path().as_str(), "base");
    assert_eq!(leaf, "kustomization.yaml");

    let (dir, leaf) = disk.cleaned_abs(&NormalizedPath::new("base")).unwrap();
    assert_eq!(dir.as_path().as_str(), "base");
    assert_eq!(leaf, "");
}

#[test]
fn test_mutations_are_rejected_and_leave_disk_untouched() {
    let (dir, disk) = setup();
    let target = NormalizedPath::new("base/new.yaml");

    assert!(disk.create(&target).unwrap_err().is_unsupported());
    assert!(disk.write_file(&target, b"x").unwrap_err().is_unsupported());
    assert!(disk.mkdir(&NormalizedPath::new("extra")).unwrap_err().is_unsupported());
    assert!(disk.mkdir_all(&NormalizedPath::new("a/b")).unwrap_err().is_unsupported());
    assert!(disk.remove_all(&NormalizedPath::new("base")).unwrap_err().is_unsupported());

    assert!(!dir.path().join("base/new.yaml").exists());
    assert!(!dir.path().join("extra").exists());
    assert!(dir.path().join("base/kustomization.yaml").exists());
}

#[test]
fn test_read_dir_lists_sorted_entries() {
    let (dir, disk) = setup();
    fs::create_dir_all(dir.path().join("overlays/staging")).unwrap();
    fs::create_dir_all(dir.path().join("overlays/dev")).unwrap();
    fs::write(dir.path().join("overlays/README.md"), "notes").unwrap();

    let names = disk.read_dir(&NormalizedPath::new("overlays")).unwrap();
    assert_eq!(names, vec!["README.md", "dev", "staging"]);
}

#[test]
fn test_read_dir_of_missing_or_file_is_not_found() {
    let (_dir, disk) = setup();
    assert!(disk.read_dir(&NormalizedPath::new("overlays")).unwrap_err().is_not_found());
    assert!(
        disk.read_dir(&NormalizedPath::new("base/kustomization.yaml"))
            .unwrap_err()
            .is_not_found()
    );
}

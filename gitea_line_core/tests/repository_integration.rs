mod support;

use std::fs;

use gitea_line_core::{BranchRef, GitVcs, VcsProvider};
use tempfile::TempDir;

use support::{
    canonical_root, commit_all, file_path, init_repo, set_upstream_config, track, write_file,
    REMOTE_URL,
};

#[test]
fn tracked_branch_reports_remote_and_first_url() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("src/app.go"), "package main\n");
    commit_all(&repo, "initial");
    track(&repo, "main", "origin", REMOTE_URL);

    let context = GitVcs::new()
        .repository_context(file_path(&temp, "src/app.go"))
        .expect("context");

    assert_eq!(
        context.root_path,
        canonical_root(&temp).to_string_lossy().as_ref()
    );
    let branch = context.current_local_branch.expect("current branch");
    assert_eq!(branch.name, "main");
    let upstream = branch.tracked_remote_branch.expect("upstream");
    assert_eq!(upstream.name, "origin/main");
    assert_eq!(upstream.remote.name, "origin");
    assert_eq!(upstream.remote.first_fetch_url, REMOTE_URL);
}

#[test]
fn branch_without_upstream_has_no_tracked_branch() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");
    repo.remote("origin", REMOTE_URL).expect("add remote");

    let context = GitVcs::new()
        .repository_for_file(&file_path(&temp, "README.md"))
        .expect("lookup")
        .expect("repository");

    assert_eq!(
        context.current_local_branch,
        Some(BranchRef::untracked("main"))
    );
}

#[test]
fn local_upstream_is_not_a_remote_branch() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");
    set_upstream_config(&repo, "main", ".", "refs/heads/base");

    let context = GitVcs::new()
        .repository_context(file_path(&temp, "README.md"))
        .expect("context");

    assert!(context.tracked_remote_branch().is_none());
}

#[test]
fn upstream_pointing_at_missing_remote_is_ignored() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");
    set_upstream_config(&repo, "main", "gone", "refs/heads/main");

    let context = GitVcs::new()
        .repository_for_file(&file_path(&temp, "README.md"))
        .expect("lookup")
        .expect("repository");

    assert_eq!(
        context.current_local_branch,
        Some(BranchRef::untracked("main"))
    );
}

#[test]
fn detached_head_has_no_current_branch() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    let oid = commit_all(&repo, "initial");
    track(&repo, "main", "origin", REMOTE_URL);
    repo.set_head_detached(oid).expect("detach");

    let context = GitVcs::new()
        .repository_context(file_path(&temp, "README.md"))
        .expect("context");

    assert!(context.current_local_branch.is_none());
}

#[test]
fn unborn_head_has_no_current_branch() {
    let (temp, _repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");

    let context = GitVcs::new()
        .repository_context(file_path(&temp, "README.md"))
        .expect("context");

    assert!(context.current_local_branch.is_none());
}

#[test]
fn untracked_and_ignored_files_are_unversioned() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join(".gitignore"), "target/\n");
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");

    write_file(temp.path().join("notes.txt"), "scratch\n");
    write_file(temp.path().join("target/out.log"), "build\n");

    let vcs = GitVcs::new();
    assert!(!vcs
        .is_unversioned(&file_path(&temp, "README.md"))
        .expect("committed"));
    assert!(vcs
        .is_unversioned(&file_path(&temp, "notes.txt"))
        .expect("untracked"));
    assert!(vcs
        .is_unversioned(&file_path(&temp, "target/out.log"))
        .expect("ignored"));
}

#[test]
fn staged_file_is_versioned() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");

    write_file(temp.path().join("src/new.rs"), "fn main() {}\n");
    let mut index = repo.index().expect("index");
    index
        .add_path(std::path::Path::new("src/new.rs"))
        .expect("stage");
    index.write().expect("write index");

    assert!(!GitVcs::new()
        .is_unversioned(&file_path(&temp, "src/new.rs"))
        .expect("staged"));
}

#[test]
fn modified_file_is_versioned() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("README.md"), "hello\n");
    commit_all(&repo, "initial");
    write_file(temp.path().join("README.md"), "hello world\n");

    assert!(!GitVcs::new()
        .is_unversioned(&file_path(&temp, "README.md"))
        .expect("modified"));
}

#[test]
fn file_outside_any_repository_resolves_to_none() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("loose.txt");
    fs::write(&file, "loose\n").expect("write");
    let file = file.to_string_lossy().into_owned();

    let vcs = GitVcs::new();
    assert!(!vcs.is_unversioned(&file).expect("outside repo"));
    assert!(vcs.repository_for_file(&file).expect("lookup").is_none());
}

#[test]
fn missing_file_is_a_provider_error() {
    let (temp, _repo) = init_repo();
    let missing = temp.path().join("nope.rs").to_string_lossy().into_owned();

    assert!(GitVcs::new().repository_for_file(&missing).is_err());
}

#[test]
fn nested_file_resolves_repository_root() {
    let (temp, repo) = init_repo();
    write_file(temp.path().join("a/b/c/deep.rs"), "// deep\n");
    commit_all(&repo, "initial");

    let context = GitVcs::new()
        .repository_context(file_path(&temp, "a/b/c/deep.rs"))
        .expect("context");

    assert_eq!(
        context.root_path,
        canonical_root(&temp).to_string_lossy().as_ref()
    );
}

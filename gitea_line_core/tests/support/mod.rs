#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{
    ErrorClass, ErrorCode, IndexAddOption, Repository as GitRepository, RepositoryInitOptions,
};
use tempfile::TempDir;

pub const REMOTE_URL: &str = "https://gitea.example.com/org/proj.git";

/// A fresh repository whose unborn `HEAD` points at `main`.
pub fn init_repo() -> (TempDir, GitRepository) {
    let temp = TempDir::new().expect("tempdir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = GitRepository::init_opts(temp.path(), &opts).expect("init repo");
    (temp, repo)
}

/// Canonical path of `relative` inside the temp directory, as a string.
pub fn file_path(temp: &TempDir, relative: &str) -> String {
    let path = canonical_root(temp).join(relative);
    path.to_string_lossy().into_owned()
}

pub fn canonical_root(temp: &TempDir) -> PathBuf {
    temp.path().canonicalize().expect("canonical temp path")
}

pub fn write_file(path: impl AsRef<Path>, contents: &str) {
    fs::create_dir_all(
        path.as_ref()
            .parent()
            .expect("path should have a parent directory"),
    )
    .expect("create directories");
    fs::write(path, contents).expect("write file");
}

pub fn commit_all(repo: &GitRepository, message: &str) -> git2::Oid {
    let parents = match repo.head() {
        Ok(reference) => vec![reference.peel_to_commit().expect("head commit")],
        Err(err)
            if matches!(
                (err.class(), err.code()),
                (
                    ErrorClass::Reference,
                    ErrorCode::NotFound | ErrorCode::UnbornBranch
                )
            ) =>
        {
            Vec::new()
        }
        Err(err) => panic!("unexpected head error: {err}"),
    };

    let mut index = repo.index().expect("index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("add all");
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let signature = git2::Signature::now("Test User", "test@example.com").expect("signature");

    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )
    .expect("commit")
}

/// Add `remote` and configure `branch` to track the same-named branch on it.
pub fn track(repo: &GitRepository, branch: &str, remote: &str, url: &str) {
    repo.remote(remote, url).expect("add remote");
    set_upstream_config(repo, branch, remote, &format!("refs/heads/{branch}"));
}

pub fn set_upstream_config(repo: &GitRepository, branch: &str, remote: &str, merge: &str) {
    let mut config = repo.config().expect("config");
    config
        .set_str(&format!("branch.{branch}.remote"), remote)
        .expect("set remote");
    config
        .set_str(&format!("branch.{branch}.merge"), merge)
        .expect("set merge");
}

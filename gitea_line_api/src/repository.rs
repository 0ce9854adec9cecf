use serde::{Deserialize, Serialize};

/// A remote as configured in the repository (e.g. `origin`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    /// Configured remote name.
    pub name: String,
    /// First configured fetch URL. May or may not end in `.git`.
    pub first_fetch_url: String,
}

impl RemoteRef {
    /// Construct a remote reference.
    #[must_use]
    pub fn new(name: impl Into<String>, first_fetch_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_fetch_url: first_fetch_url.into(),
        }
    }
}

/// Remote-tracking branch that a local branch pulls from by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBranchRef {
    /// Short name of the remote-tracking branch (e.g. `origin/main`).
    pub name: String,
    /// Remote hosting the branch.
    pub remote: RemoteRef,
}

impl RemoteBranchRef {
    /// Construct a remote branch reference.
    #[must_use]
    pub fn new(name: impl Into<String>, remote: RemoteRef) -> Self {
        Self {
            name: name.into(),
            remote,
        }
    }
}

/// A local branch and the remote branch it tracks, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Local branch name (e.g. `feature/x`).
    pub name: String,
    /// Tracked remote branch. `None` when no upstream is configured.
    #[serde(default)]
    pub tracked_remote_branch: Option<RemoteBranchRef>,
}

impl BranchRef {
    /// A local branch without an upstream.
    #[must_use]
    pub fn untracked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracked_remote_branch: None,
        }
    }

    /// A local branch tracking `remote_branch`.
    #[must_use]
    pub fn tracking(name: impl Into<String>, remote_branch: RemoteBranchRef) -> Self {
        Self {
            name: name.into(),
            tracked_remote_branch: Some(remote_branch),
        }
    }
}

/// Read-only snapshot of the repository that contains a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryContext {
    /// Absolute path of the working tree root, without a trailing separator.
    pub root_path: String,
    /// Checked-out local branch. `None` for a detached or unborn `HEAD`.
    #[serde(default)]
    pub current_local_branch: Option<BranchRef>,
}

impl RepositoryContext {
    /// Construct a repository snapshot.
    #[must_use]
    pub fn new(root_path: impl Into<String>, current_local_branch: Option<BranchRef>) -> Self {
        Self {
            root_path: root_path.into(),
            current_local_branch,
        }
    }

    /// The remote branch tracked by the current local branch, when both exist.
    #[must_use]
    pub fn tracked_remote_branch(&self) -> Option<&RemoteBranchRef> {
        self.current_local_branch
            .as_ref()
            .and_then(|branch| branch.tracked_remote_branch.as_ref())
    }
}

//! Capability gate deciding whether a permalink can be offered at all.
//!
//! The checks are cheap and side-effect free so a host can run them on every
//! UI refresh. Failures are never reported to the user; the action is simply
//! not offered.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ActionContext, VcsProvider};

/// Why a permalink cannot be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No project handle.
    MissingProject,
    /// No active editor.
    MissingEditor,
    /// No active file.
    MissingFile,
    /// The caret is not in a selectable state.
    InvalidCaret,
    /// The file is not tracked by version control.
    Unversioned,
    /// The file is not inside a repository.
    NoRepository,
    /// `HEAD` is detached or unborn.
    NoCurrentBranch,
    /// The current branch has no upstream on a remote.
    NoTrackedBranch,
    /// The VCS provider failed while answering.
    ProviderFailed,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingProject => "no project",
            Self::MissingEditor => "no active editor",
            Self::MissingFile => "no active file",
            Self::InvalidCaret => "caret is not valid",
            Self::Unversioned => "file is not under version control",
            Self::NoRepository => "file is not inside a repository",
            Self::NoCurrentBranch => "no branch is checked out",
            Self::NoTrackedBranch => "current branch does not track a remote branch",
            Self::ProviderFailed => "version control state could not be read",
        };
        f.write_str(text)
    }
}

/// Outcome of [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Every precondition holds.
    Available,
    /// The first precondition that failed.
    Unavailable(UnavailableReason),
}

impl Availability {
    /// Whether the action may be offered.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Evaluate the preconditions in order, stopping at the first failure.
///
/// 1. project, editor and file are present and the caret is valid
/// 2. the file is versioned
/// 3. a repository resolves for the file
/// 4. the repository has a current local branch
/// 5. that branch tracks a remote branch
pub fn check<V>(context: &ActionContext, vcs: &V) -> Availability
where
    V: VcsProvider + ?Sized,
{
    let availability = evaluate(context, vcs);
    if let Availability::Unavailable(reason) = availability {
        debug!(file = ?context.file, %reason, "permalink unavailable");
    }
    availability
}

/// Boolean form of [`check`].
pub fn is_available<V>(context: &ActionContext, vcs: &V) -> bool
where
    V: VcsProvider + ?Sized,
{
    check(context, vcs).is_available()
}

fn evaluate<V>(context: &ActionContext, vcs: &V) -> Availability
where
    V: VcsProvider + ?Sized,
{
    use Availability::Unavailable;

    if context.project.is_none() {
        return Unavailable(UnavailableReason::MissingProject);
    }
    let Some(editor) = context.editor else {
        return Unavailable(UnavailableReason::MissingEditor);
    };
    let Some(file) = context.file.as_deref() else {
        return Unavailable(UnavailableReason::MissingFile);
    };
    if !editor.caret.valid {
        return Unavailable(UnavailableReason::InvalidCaret);
    }

    match vcs.is_unversioned(file) {
        Ok(false) => {}
        Ok(true) => return Unavailable(UnavailableReason::Unversioned),
        Err(err) => {
            warn!(%file, error = %err, "unversioned check failed");
            return Unavailable(UnavailableReason::ProviderFailed);
        }
    }

    let repository = match vcs.repository_for_file(file) {
        Ok(Some(repository)) => repository,
        Ok(None) => return Unavailable(UnavailableReason::NoRepository),
        Err(err) => {
            warn!(%file, error = %err, "repository lookup failed");
            return Unavailable(UnavailableReason::ProviderFailed);
        }
    };

    match repository.current_local_branch {
        None => Unavailable(UnavailableReason::NoCurrentBranch),
        Some(branch) if branch.tracked_remote_branch.is_none() => {
            Unavailable(UnavailableReason::NoTrackedBranch)
        }
        Some(_) => Availability::Available,
    }
}

//! Version-control state read from git working trees through libgit2.

use std::path::{Path, PathBuf};

use git2::{ErrorClass, ErrorCode, Repository as GitRepository, Status};
use tracing::debug;

use crate::{
    BranchRef, Error, HostError, HostResult, RemoteBranchRef, RemoteRef, RepositoryContext,
    Result, VcsProvider,
};

/// [`VcsProvider`] backed by the git repository enclosing each file.
///
/// Nothing is cached: every call discovers and opens the repository again, so
/// each answer is an independent snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitVcs;

impl GitVcs {
    /// Construct a provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Snapshot the repository containing `file`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when `file` cannot be canonicalized,
    /// [`Error::NotARepository`] when no repository encloses it,
    /// [`Error::BareRepository`] for repositories without a working tree and
    /// [`Error::Git`] for other libgit2 failures.
    pub fn repository_context(&self, file: impl AsRef<Path>) -> Result<RepositoryContext> {
        let file = canonicalize(file.as_ref())?;
        let (repo, root) = open_enclosing(&file)?;
        let current_local_branch = current_branch(&repo)?;

        Ok(RepositoryContext {
            root_path: display_path(&root),
            current_local_branch,
        })
    }

    /// Whether `file` is untracked or ignored in its repository.
    ///
    /// # Errors
    ///
    /// Same as [`GitVcs::repository_context`], plus libgit2 status failures
    /// (for example when the file does not exist).
    pub fn file_is_unversioned(&self, file: impl AsRef<Path>) -> Result<bool> {
        let file = canonicalize(file.as_ref())?;
        let (repo, root) = open_enclosing(&file)?;
        let relative = file.strip_prefix(&root).map_err(|_| Error::PathOutsideRepository {
            path: display_path(&file),
            root: display_path(&root),
        })?;

        let status = repo.status_file(relative)?;
        debug!(file = %display_path(&file), ?status, "file status");
        Ok(status.intersects(Status::WT_NEW | Status::IGNORED))
    }
}

impl VcsProvider for GitVcs {
    fn is_unversioned(&self, file: &str) -> HostResult<bool> {
        match self.file_is_unversioned(file) {
            Ok(unversioned) => Ok(unversioned),
            Err(Error::NotARepository { .. } | Error::BareRepository { .. }) => Ok(false),
            Err(err) => Err(HostError::message(err.to_string())),
        }
    }

    fn repository_for_file(&self, file: &str) -> HostResult<Option<RepositoryContext>> {
        match self.repository_context(file) {
            Ok(context) => Ok(Some(context)),
            Err(Error::NotARepository { .. } | Error::BareRepository { .. }) => Ok(None),
            Err(err) => Err(HostError::message(err.to_string())),
        }
    }
}

fn open_enclosing(file: &Path) -> Result<(GitRepository, PathBuf)> {
    let start = file.parent().unwrap_or(file);
    let repo = match GitRepository::discover(start) {
        Ok(repo) => repo,
        Err(err) if err.class() == ErrorClass::Repository && err.code() == ErrorCode::NotFound => {
            return Err(Error::NotARepository {
                path: display_path(file),
            })
        }
        Err(err) => return Err(Error::from(err)),
    };

    let root = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::BareRepository {
            path: display_path(start),
        })?;
    let root = canonicalize(&root)?;
    Ok((repo, root))
}

fn current_branch(repo: &GitRepository) -> Result<Option<BranchRef>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(err)
            if matches!(
                (err.class(), err.code()),
                (
                    ErrorClass::Reference,
                    ErrorCode::NotFound | ErrorCode::UnbornBranch
                )
            ) =>
        {
            return Ok(None)
        }
        Err(err) => return Err(Error::from(err)),
    };

    if !head.is_branch() {
        return Ok(None);
    }
    let (Some(refname), Some(name)) = (head.name(), head.shorthand()) else {
        return Ok(None);
    };

    Ok(Some(BranchRef {
        name: name.to_owned(),
        tracked_remote_branch: tracked_remote_branch(repo, refname)?,
    }))
}

fn tracked_remote_branch(repo: &GitRepository, refname: &str) -> Result<Option<RemoteBranchRef>> {
    let remote_name = match repo.branch_upstream_remote(refname) {
        Ok(buf) => buf.as_str().map(str::to_owned),
        Err(err) if err.code() == ErrorCode::NotFound => return Ok(None),
        Err(err) => return Err(Error::from(err)),
    };
    // `.` is the local repository acting as upstream, not a hosted remote.
    let Some(remote_name) = remote_name.filter(|name| name != ".") else {
        return Ok(None);
    };

    let upstream = match repo.branch_upstream_name(refname) {
        Ok(buf) => buf.as_str().map(str::to_owned),
        Err(err) if err.code() == ErrorCode::NotFound => return Ok(None),
        Err(err) => return Err(Error::from(err)),
    };
    let Some(upstream) = upstream else {
        return Ok(None);
    };

    let remote = match repo.find_remote(&remote_name) {
        Ok(remote) => remote,
        Err(err) if err.code() == ErrorCode::NotFound => return Ok(None),
        Err(err) => return Err(Error::from(err)),
    };
    let Some(url) = remote.url() else {
        return Ok(None);
    };

    let short = upstream
        .strip_prefix("refs/remotes/")
        .unwrap_or(&upstream)
        .to_owned();
    Ok(Some(RemoteBranchRef::new(
        short,
        RemoteRef::new(remote_name, url),
    )))
}

/// Canonical form of `file`, rendered the way repository roots are reported.
pub(crate) fn canonical_display_path(file: &str) -> Option<String> {
    canonicalize(Path::new(file)).ok().map(|path| display_path(&path))
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|source| Error::Io {
        path: display_path(path),
        source,
    })
}

/// Render a path with `/` separators and no trailing separator.
fn display_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    let rendered = if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    };
    let trimmed = rendered.trim_end_matches('/');
    if trimmed.is_empty() {
        rendered
    } else {
        trimmed.to_owned()
    }
}

use std::borrow::Cow;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    availability::{self, Availability, UnavailableReason},
    permalink::{build_url_checked, repo_relative_path, PermalinkRequest},
    repository::canonical_display_path,
    worker::WorkerPool,
    ActionContext, Error, LinkConfig, Permalink, Result, VcsProvider,
};

/// Resolves permalinks for editor contexts against a VCS provider.
///
/// Availability checks run on the caller's thread; resolution can be pushed
/// onto the service's worker pool with [`PermalinkService::resolve_in_background`].
pub struct PermalinkService<V> {
    vcs: Arc<V>,
    workers: WorkerPool,
}

impl<V> PermalinkService<V>
where
    V: VcsProvider + 'static,
{
    /// Construct a service with `config.workers` resolution threads.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker pool cannot be started.
    pub fn new(vcs: V, config: &LinkConfig) -> Result<Self> {
        Ok(Self {
            vcs: Arc::new(vcs),
            workers: WorkerPool::new(config.workers)?,
        })
    }

    /// The provider this service reads VCS state from.
    #[must_use]
    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Whether a permalink can be offered for `context`.
    #[must_use]
    pub fn is_available(&self, context: &ActionContext) -> bool {
        availability::is_available(context, self.vcs.as_ref())
    }

    /// Detailed form of [`PermalinkService::is_available`].
    #[must_use]
    pub fn availability(&self, context: &ActionContext) -> Availability {
        availability::check(context, self.vcs.as_ref())
    }

    /// Resolve the permalink for `context` on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] when a precondition no longer holds,
    /// [`Error::Vcs`] when the provider fails, and the validation errors of
    /// [`build_url_checked`].
    pub fn resolve(&self, context: &ActionContext) -> Result<Permalink> {
        resolve_with(self.vcs.as_ref(), context)
    }

    /// Resolve the permalink for `context` on a worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerDisconnected`] when the job cannot be queued.
    pub fn resolve_in_background(&self, context: ActionContext) -> Result<PendingPermalink> {
        let (sender, receiver) = mpsc::sync_channel(1);
        let vcs = Arc::clone(&self.vcs);
        self.workers.execute(move || {
            let result = resolve_with(vcs.as_ref(), &context);
            // The caller may have stopped waiting; nothing to report then.
            let _ = sender.send(result);
        })?;
        Ok(PendingPermalink { receiver })
    }
}

impl<V> std::fmt::Debug for PermalinkService<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermalinkService")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

/// Handle to a resolution running on the worker pool.
#[derive(Debug)]
pub struct PendingPermalink {
    receiver: Receiver<Result<Permalink>>,
}

impl PendingPermalink {
    /// Block until the worker sends its result.
    ///
    /// # Errors
    ///
    /// Returns the resolution error, or [`Error::WorkerDisconnected`] when the
    /// job died without answering.
    pub fn wait(self) -> Result<Permalink> {
        self.receiver
            .recv()
            .map_err(|_| Error::WorkerDisconnected)?
    }
}

fn resolve_with<V>(vcs: &V, context: &ActionContext) -> Result<Permalink>
where
    V: VcsProvider + ?Sized,
{
    let unavailable = |reason| Error::Unavailable { reason };

    if context.project.is_none() {
        return Err(unavailable(UnavailableReason::MissingProject));
    }
    let editor = context
        .editor
        .ok_or_else(|| unavailable(UnavailableReason::MissingEditor))?;
    let file = context
        .file
        .as_deref()
        .ok_or_else(|| unavailable(UnavailableReason::MissingFile))?;

    let repository = vcs
        .repository_for_file(file)
        .map_err(|source| Error::Vcs { source })?
        .ok_or_else(|| unavailable(UnavailableReason::NoRepository))?;
    let branch = repository
        .current_local_branch
        .as_ref()
        .ok_or_else(|| unavailable(UnavailableReason::NoCurrentBranch))?;
    let tracked = branch
        .tracked_remote_branch
        .as_ref()
        .ok_or_else(|| unavailable(UnavailableReason::NoTrackedBranch))?;

    // Roots are canonical; a file reached through a symlink only matches
    // once it is canonical too.
    let file = if repo_relative_path(&repository.root_path, file).is_some() {
        Cow::Borrowed(file)
    } else {
        canonical_display_path(file).map_or(Cow::Borrowed(file), Cow::Owned)
    };

    debug!(
        root = %repository.root_path,
        %file,
        branch = %branch.name,
        upstream = %tracked.name,
        remote = %tracked.remote.name,
        "resolving permalink"
    );

    let permalink = build_url_checked(&PermalinkRequest {
        repository_root: &repository.root_path,
        absolute_file_path: &file,
        line_number: editor.caret.line_number(),
        local_branch_name: &branch.name,
        remote_first_url: &tracked.remote.first_fetch_url,
    })?;
    info!(url = %permalink.url, "resolved permalink");
    Ok(permalink)
}

mod registry;
mod types;

pub use registry::LauncherRegistry;
pub use types::{
    ConfirmRequest, Confirmation, HostError, HostResult, LauncherSummary, OPEN_URL_TITLE,
};

use gitea_line_api::RepositoryContext;

/// Version-control metadata provider consulted for the active file.
///
/// Implementations must not cache between calls: every answer describes the
/// repository at the moment of the call.
pub trait VcsProvider: Send + Sync {
    /// Whether `file` is known to the VCS but not tracked by it.
    ///
    /// A file outside any repository is not unversioned; the repository lookup
    /// reports that case.
    ///
    /// # Errors
    ///
    /// Implementors should surface failures reading VCS state.
    fn is_unversioned(&self, file: &str) -> HostResult<bool>;

    /// Resolve the repository containing `file`, if any.
    ///
    /// # Errors
    ///
    /// Implementors should surface failures reading VCS state.
    fn repository_for_file(&self, file: &str) -> HostResult<Option<RepositoryContext>>;
}

/// Yes/no dialog shown before navigating away from the editor.
pub trait ConfirmPrompt: Send + Sync {
    /// Ask the user to confirm `request`.
    ///
    /// # Errors
    ///
    /// Returns host-defined errors when the prompt cannot be shown or answered.
    fn confirm(&self, request: &ConfirmRequest) -> HostResult<Confirmation>;
}

/// Opens a URL outside the editor, usually in the system browser.
pub trait BrowserLauncher: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label for UI surfaces.
    fn label(&self) -> &'static str;

    /// Navigate to `url`.
    ///
    /// # Errors
    ///
    /// Returns host-defined errors when the launcher fails.
    fn browse(&self, url: &str) -> HostResult<()>;
}

//! Resolves a line in a local git checkout to its permalink on a Gitea host.
//!
//! The crate is layered around three responsibilities:
//! - deciding whether a permalink can be offered ([`availability`])
//! - composing the permalink ([`permalink`]) from VCS state ([`repository`])
//! - running resolution off the caller's thread and handing the result to the
//!   confirmation and browser collaborators ([`PermalinkService`], [`OpenService`])

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Capability gate run before any resolution work.
pub mod availability;
/// Environment-driven runtime settings.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
mod open;
/// Permalink composition.
pub mod permalink;
/// Git working tree access through libgit2.
pub mod repository;
mod service;
/// Worker threads for resolution jobs.
pub mod worker;

pub use availability::{Availability, UnavailableReason};
pub use config::LinkConfig;
pub use gitea_line_api::{
    ActionContext, BranchRef, Caret, EditorState, OpenOutcome, Permalink, RemoteBranchRef,
    RemoteRef, RepositoryContext,
};
pub use gitea_line_host_api::{
    BrowserLauncher, ConfirmPrompt, ConfirmRequest, Confirmation, HostError, HostResult,
    LauncherRegistry, LauncherSummary, VcsProvider,
};
pub use gitea_line_hosts::{
    default_registry, AutoConfirm, PrintLauncher, SystemBrowser, TerminalPrompt,
};
pub use open::OpenService;
pub use permalink::{build_url, build_url_checked, PermalinkRequest};
pub use repository::GitVcs;
pub use service::{PendingPermalink, PermalinkService};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying git operation failed.
    #[error("git error: {source}")]
    Git {
        /// Underlying libgit2 error.
        #[from]
        source: git2::Error,
    },
    /// Provided path is not inside a git repository.
    #[error("path is not inside a git repository: {path}")]
    NotARepository {
        /// Path that failed to resolve to a repository.
        path: String,
    },
    /// Bare repositories have no working tree to link from.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// A precondition for building a permalink does not hold.
    #[error("permalink unavailable: {reason}")]
    Unavailable {
        /// First precondition that failed.
        reason: UnavailableReason,
    },
    /// The local branch name is empty.
    #[error("local branch name is empty")]
    EmptyBranchName,
    /// The remote URL is empty once normalized.
    #[error("remote URL is empty")]
    EmptyRemoteUrl,
    /// Line numbers start at 1.
    #[error("line number must be at least 1")]
    InvalidLineNumber,
    /// The file does not live under the repository root.
    #[error("{path} is not inside repository root {root}")]
    PathOutsideRepository {
        /// Offending file path.
        path: String,
        /// Repository root it was expected under.
        root: String,
    },
    /// The VCS provider failed.
    #[error("version control lookup failed: {source}")]
    Vcs {
        /// Error reported by the provider.
        source: HostError,
    },
    /// The confirmation prompt failed.
    #[error("confirmation prompt failed: {source}")]
    Prompt {
        /// Error reported by the prompt.
        source: HostError,
    },
    /// The browser launcher failed.
    #[error("launcher '{launcher}' failed: {source}")]
    Launcher {
        /// Id of the launcher.
        launcher: String,
        /// Error reported by the launcher.
        source: HostError,
    },
    /// No launcher is registered under the requested id.
    #[error("launcher '{launcher}' is not registered")]
    LauncherNotRegistered {
        /// Requested launcher id.
        launcher: String,
    },
    /// A configuration value did not parse.
    #[error("invalid {key} value '{value}': {expected}")]
    Config {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// What was expected instead.
        expected: &'static str,
    },
    /// The worker pool could not be started.
    #[error("worker pool error: {message}")]
    WorkerPool {
        /// Description of the failure.
        message: String,
    },
    /// A resolution job ended without sending a result.
    #[error("resolution worker stopped before answering")]
    WorkerDisconnected,
}

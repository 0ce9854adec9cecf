use serde::{Deserialize, Serialize};

/// Title of the confirmation shown before opening a permalink.
pub const OPEN_URL_TITLE: &str = "Open URL in Your Browser?";

/// Question put to the user before a URL is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    /// Dialog title.
    pub title: String,
    /// Question text.
    pub message: String,
    /// URL that will be opened on confirmation.
    pub url: String,
}

impl ConfirmRequest {
    /// The standard "open this URL?" question for `url`.
    #[must_use]
    pub fn open_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: OPEN_URL_TITLE.to_string(),
            message: format!("Do you want to open \"{url}\""),
            url,
        }
    }
}

/// Answer to a [`ConfirmRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    /// Proceed.
    Yes,
    /// Do nothing.
    No,
}

impl Confirmation {
    /// Whether the user agreed.
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Summary information about a registered browser launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherSummary {
    /// Stable identifier for the launcher.
    pub id: String,
    /// Human-friendly label for display.
    pub label: String,
}

/// Errors surfaced by collaborator implementations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Generic failure surfaced by the collaborator.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl HostError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for collaborator operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

use serde::{Deserialize, Serialize};

/// A composed web permalink and the pieces it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permalink {
    /// Full URL, e.g. `https://host/org/repo/src/branch/main/src/app.go#L42`.
    pub url: String,
    /// Branch the link is pinned to.
    pub branch: String,
    /// File path relative to the repository root.
    pub relative_path: String,
    /// One-based line number in the anchor.
    pub line: u32,
}

impl std::fmt::Display for Permalink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// Result of offering a permalink to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenOutcome {
    /// The user confirmed and the browser launcher was invoked.
    Opened,
    /// The user declined; nothing was launched.
    Declined,
}

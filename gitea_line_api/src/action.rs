use serde::{Deserialize, Serialize};

/// Caret position reported by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caret {
    /// Zero-based logical line.
    pub line: u32,
    /// Whether the caret is in a valid, selectable state.
    pub valid: bool,
}

impl Caret {
    /// A valid caret on the zero-based `line`.
    #[must_use]
    pub const fn at(line: u32) -> Self {
        Self { line, valid: true }
    }

    /// One-based line number as shown in the web UI anchor.
    #[must_use]
    pub const fn line_number(self) -> u32 {
        self.line.saturating_add(1)
    }
}

/// Editor state captured when the action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// Primary caret.
    pub caret: Caret,
}

/// Everything the editor collaborator hands over for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActionContext {
    /// Opaque project handle.
    #[serde(default)]
    pub project: Option<String>,
    /// Active editor, if any.
    #[serde(default)]
    pub editor: Option<EditorState>,
    /// Absolute path of the active file.
    #[serde(default)]
    pub file: Option<String>,
}

impl ActionContext {
    /// Context for `file` with the caret on the zero-based `caret_line`.
    #[must_use]
    pub fn for_file(
        project: impl Into<String>,
        file: impl Into<String>,
        caret_line: u32,
    ) -> Self {
        Self {
            project: Some(project.into()),
            editor: Some(EditorState {
                caret: Caret::at(caret_line),
            }),
            file: Some(file.into()),
        }
    }
}

//! Composition of Gitea `src/branch` permalinks.
//!
//! Everything here is string manipulation only: no filesystem or network
//! access, and identical inputs always produce identical output.

use crate::{Error, Permalink, Result};

const GIT_SUFFIX: &str = ".git";

/// Inputs for [`build_url_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermalinkRequest<'a> {
    /// Working tree root of the repository.
    pub repository_root: &'a str,
    /// Absolute path of the file, inside `repository_root`.
    pub absolute_file_path: &'a str,
    /// One-based line number.
    pub line_number: u32,
    /// Checked-out local branch.
    pub local_branch_name: &'a str,
    /// First fetch URL of the tracked remote.
    pub remote_first_url: &'a str,
}

/// Strip one trailing `.git` from a remote URL.
///
/// The match is exact and case-sensitive; scheme, host and path are left alone.
#[must_use]
pub fn normalize_remote_url(url: &str) -> &str {
    url.strip_suffix(GIT_SUFFIX).unwrap_or(url)
}

/// Path of `absolute_path` relative to `root`, without a leading separator.
///
/// Returns `None` unless `absolute_path` is strictly longer than `root`,
/// starts with it and continues with a path separator.
#[must_use]
pub fn repo_relative_path<'a>(root: &str, absolute_path: &'a str) -> Option<&'a str> {
    let root = root.trim_end_matches(is_separator);
    let rest = absolute_path.strip_prefix(root)?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(sep) if is_separator(sep) => {
            let relative = chars.as_str();
            (!relative.is_empty()).then_some(relative)
        }
        _ => None,
    }
}

/// Compose `{remote}/src/branch/{branch}/{path}#L{line}`.
///
/// Inputs are not validated: an empty branch or remote, or a file outside the
/// repository, produce a well-formed but broken link. Use
/// [`build_url_checked`] to reject those.
#[must_use]
pub fn build_url(
    repository_root: &str,
    absolute_file_path: &str,
    line_number: u32,
    local_branch_name: &str,
    remote_first_url: &str,
) -> String {
    let relative =
        repo_relative_path(repository_root, absolute_file_path).unwrap_or(absolute_file_path);
    compose(
        normalize_remote_url(remote_first_url),
        local_branch_name,
        relative,
        line_number,
    )
}

/// Validating variant of [`build_url`].
///
/// # Errors
///
/// Returns [`Error::EmptyBranchName`], [`Error::EmptyRemoteUrl`],
/// [`Error::PathOutsideRepository`] or [`Error::InvalidLineNumber`] instead of
/// producing a broken link.
pub fn build_url_checked(request: &PermalinkRequest<'_>) -> Result<Permalink> {
    if request.local_branch_name.is_empty() {
        return Err(Error::EmptyBranchName);
    }
    let remote = normalize_remote_url(request.remote_first_url);
    if remote.is_empty() {
        return Err(Error::EmptyRemoteUrl);
    }
    if request.line_number == 0 {
        return Err(Error::InvalidLineNumber);
    }
    let relative = repo_relative_path(request.repository_root, request.absolute_file_path)
        .ok_or_else(|| Error::PathOutsideRepository {
            path: request.absolute_file_path.to_string(),
            root: request.repository_root.to_string(),
        })?;

    Ok(Permalink {
        url: compose(
            remote,
            request.local_branch_name,
            relative,
            request.line_number,
        ),
        branch: request.local_branch_name.to_string(),
        relative_path: relative.to_string(),
        line: request.line_number,
    })
}

fn compose(remote: &str, branch: &str, relative_path: &str, line_number: u32) -> String {
    format!("{remote}/src/branch/{branch}/{relative_path}#L{line_number}")
}

const fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

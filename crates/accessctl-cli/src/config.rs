//! Run configuration assembled once from parsed CLI flags.

use std::path::PathBuf;
use std::time::Duration;

/// Immutable per-run configuration, passed into the flow by reference.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Authorization server address.
    pub proxy: String,
    /// Target user the request is made for.
    pub user: String,
    /// Roles to request, in the order they were given.
    pub roles: Vec<String>,
    /// Resource ids to scope the request to (normally empty).
    pub resource_ids: Vec<String>,
    /// Identity file path; `None` means the local profile.
    pub identity: Option<PathBuf>,
    /// Poll for the user to appear instead of failing fast.
    pub wait_for_user: bool,
    /// Delay between user-list polls.
    pub poll_interval: Duration,
    /// Submit an approval review after creating the request.
    pub approve_request: bool,
}

/// Split a comma-delimited list, preserving order and entries as given.
/// No trimming and no empty-entry filtering; the server validates names.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_order() {
        assert_eq!(split_list("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_single_entry() {
        assert_eq!(split_list("editor"), vec!["editor"]);
    }

    #[test]
    fn split_empty_string_yields_no_entries() {
        assert!(split_list("").is_empty());
    }

    #[test]
    fn split_keeps_empty_entries_as_given() {
        // "a,,b" is passed through untouched; the server rejects bad names.
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
    }
}

//! Git project slice.

use serde::{Deserialize, Serialize};

/// One repository as reported by the backend.
///
/// The list order is the backend's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitProject {
    pub name: String,
    pub branch: String,
    pub has_changes: bool,
    /// Absolute path on the host, when the backend sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// `"<short hash> <subject>"` of HEAD, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

impl GitProject {
    pub fn new(name: impl Into<String>, branch: impl Into<String>, has_changes: bool) -> Self {
        Self {
            name: name.into(),
            branch: branch.into(),
            has_changes,
            path: None,
            last_commit: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_last_commit(mut self, commit: impl Into<String>) -> Self {
        self.last_commit = Some(commit.into());
        self
    }
}

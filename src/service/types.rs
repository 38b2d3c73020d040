// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Success payloads, one per operation. Each serializes as a JSON object
//! and is flattened into the envelope next to `"success": true`.

use serde::Serialize;
use std::path::PathBuf;

use crate::git::{CommitInfo, ConfigScope, ResetMode};

#[derive(Debug, Clone, Serialize)]
pub struct Cloned {
    pub message: String,
    pub path: PathBuf,
    /// `None` when the clone left HEAD detached.
    pub branch: Option<String>,
    /// Redacted.
    pub remote_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub branch: Option<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub staged: Vec<String>,
    pub is_dirty: bool,
    pub commit_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Committed {
    pub message: String,
    pub commit_hash: String,
    pub commit_message: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Synced {
    pub message: String,
    pub remote: String,
    pub branch: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Branches {
    pub branches: Vec<String>,
    pub current_branch: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchCreated {
    pub message: String,
    pub branch: String,
    pub checked_out: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchSwitched {
    pub message: String,
    pub branch: String,
}

/// One entry of the workspace file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        name: String,
        path: String,
        size: u64,
    },
    Directory {
        name: String,
        path: String,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileTree {
    pub tree: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileContent {
    pub content: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileWritten {
    pub message: String,
    pub path: String,
}

/// Confirmation carrying only a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct Done {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stashes {
    pub stashes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitLog {
    pub commits: Vec<CommitInfo>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diff {
    pub diff: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Merged {
    pub message: String,
    pub current_branch: Option<String>,
    pub merged_branch: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetDone {
    pub message: String,
    pub mode: ResetMode,
    pub commit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCreated {
    pub message: String,
    pub tag: String,
    pub commit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tags {
    pub tags: Vec<String>,
    pub count: usize,
}

/// Git identity, as configured or as found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub name: String,
    pub email: String,
    pub scope: ConfigScope,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsConfigured {
    pub message: String,
    pub note: String,
}

/// Summary of one workspace under the base directory.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSummary {
    pub workspace_id: String,
    pub name: String,
    pub path: PathBuf,
    pub branch: Option<String>,
    /// Redacted.
    pub remote_url: Option<String>,
    pub is_dirty: bool,
    pub has_stash: bool,
    /// Capped at [`super::repo::WORKSPACE_COMMIT_CAP`].
    pub commit_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<WorkspaceSummary>,
}

// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch listing, creation, checkout and merge.

use tracing::{info, warn};

use super::GitService;
use super::types::{BranchCreated, BranchSwitched, Branches, Merged};
use crate::error::{GitError, WsResult};
use crate::git::{query, url};
use crate::workspace::validate::check_argument;

/// Markers git prints when a merge stops on conflicts.
const CONFLICT_MARKERS: [&str; 2] = ["CONFLICT", "Automatic merge failed"];

impl GitService {
    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or a git failure.
    pub async fn list_branches(&self, session_id: &str) -> WsResult<Branches> {
        let path = self.workspaces.require_repo(session_id)?;
        let branches = self.git.local_branches(&path).await?;
        Ok(Branches {
            branches,
            current_branch: query::current_branch(&path)?,
        })
    }

    /// Create `branch_name` at HEAD, switching to it when `checkout` is set.
    ///
    /// # Errors
    ///
    /// Validation errors for the name; git's message when it already exists.
    pub async fn create_branch(
        &self,
        session_id: &str,
        branch_name: &str,
        checkout: bool,
    ) -> WsResult<BranchCreated> {
        let path = self.workspaces.require_repo(session_id)?;
        check_argument("branch", branch_name)?;

        self.git.create_branch(&path, branch_name).await?;
        if checkout {
            self.git.checkout(&path, branch_name).await?;
        }
        info!(session = session_id, branch = branch_name, checkout, "Created branch");

        Ok(BranchCreated {
            message: format!("Branch '{branch_name}' created successfully"),
            branch: branch_name.to_string(),
            checked_out: checkout,
        })
    }

    /// # Errors
    ///
    /// Validation errors for the name; git's message when the branch does not
    /// exist or local changes would be overwritten.
    pub async fn checkout_branch(
        &self,
        session_id: &str,
        branch_name: &str,
    ) -> WsResult<BranchSwitched> {
        let path = self.workspaces.require_repo(session_id)?;
        check_argument("branch", branch_name)?;

        self.git.checkout(&path, branch_name).await?;
        info!(session = session_id, branch = branch_name, "Switched branch");

        Ok(BranchSwitched {
            message: format!("Switched to branch '{branch_name}'"),
            branch: branch_name.to_string(),
        })
    }

    /// Merge `branch_name` into the current branch.
    ///
    /// On conflict the workspace is left mid-merge for manual resolution.
    ///
    /// # Errors
    ///
    /// `GitError::MergeConflict` when git stops on conflicts; any other git
    /// failure as `GitError::CommandFailed`.
    pub async fn merge(
        &self,
        session_id: &str,
        branch_name: &str,
        commit_message: Option<&str>,
    ) -> WsResult<Merged> {
        let path = self.workspaces.require_repo(session_id)?;
        check_argument("branch", branch_name)?;
        let current_branch = query::current_branch(&path)?;

        let output = self.git.merge(&path, branch_name, commit_message).await?;
        if !output.success {
            let message = url::redact(&output.message());
            let combined = output.combined();
            if CONFLICT_MARKERS.iter().any(|m| combined.contains(m)) {
                warn!(session = session_id, branch = branch_name, "Merge stopped on conflicts");
                return Err(GitError::MergeConflict {
                    branch: branch_name.to_string(),
                    message,
                }
                .into());
            }
            return Err(GitError::CommandFailed {
                command: format!("git merge {branch_name}"),
                message,
            }
            .into());
        }

        let into = current_branch.as_deref().unwrap_or("HEAD");
        info!(session = session_id, branch = branch_name, into, "Merged branch");
        Ok(Merged {
            message: format!("Merged '{branch_name}' into '{into}'"),
            current_branch,
            merged_branch: branch_name.to_string(),
        })
    }
}

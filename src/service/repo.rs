// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone, status and workspace listing.
//!
//! ```text
//! clone:  <base>/.clone-XXXX/repo  --git clone-->  ok?
//!                                                   |
//!              rm -r <base>/<id>  <---- yes --------+
//!              mv .clone-XXXX/repo <base>/<id>
//! ```
//!
//! Staging directories start with `.`, which no valid session id does, so
//! they never collide with a workspace.

use std::path::Path;

use tracing::{debug, info, warn};

use super::types::{Cloned, Status, WorkspaceList, WorkspaceSummary};
use super::{DEFAULT_REMOTE, GitService};
use crate::error::{FsError, WsResult};
use crate::git::{query, url};
use crate::workspace::validate::{check_argument, check_optional, validate_session_id};

/// Most commits counted per workspace by [`GitService::list_workspaces`].
pub const WORKSPACE_COMMIT_CAP: usize = 100;

const STAGING_PREFIX: &str = ".clone-";

impl GitService {
    /// Clone `repo_url` into the session workspace, replacing any previous
    /// workspace only once the clone has succeeded.
    ///
    /// # Errors
    ///
    /// Validation errors for the session id, URL or branch;
    /// `GitError::CloneFailed` with git's message; I/O errors while swapping
    /// the workspace into place.
    pub async fn clone_repository(
        &self,
        session_id: &str,
        repo_url: &str,
        branch: Option<&str>,
    ) -> WsResult<Cloned> {
        let dest = self.workspaces.resolve(session_id)?;
        check_argument("repository URL", repo_url)?;
        check_optional("branch", branch)?;

        let redacted = url::redact(repo_url);
        info!(session = session_id, url = %redacted, branch = ?branch, "Cloning repository");

        let base = self.workspaces.base_dir();
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(base)
            .map_err(|e| FsError::io(base, e))?;
        let staged = staging.path().join("repo");

        if let Err(e) = self.git.clone_into(repo_url, &staged, branch).await {
            warn!(session = session_id, url = %redacted, error = %e, "Clone failed");
            return Err(e);
        }

        if tokio::fs::symlink_metadata(&dest).await.is_ok() {
            debug!(path = %dest.display(), "Replacing existing workspace");
            remove_path(&dest).await?;
        }
        tokio::fs::rename(&staged, &dest)
            .await
            .map_err(|e| FsError::io(&dest, e))?;
        drop(staging);

        let branch = query::current_branch(&dest)?;
        info!(session = session_id, branch = ?branch, "Repository cloned");

        Ok(Cloned {
            message: "Repository cloned successfully".to_string(),
            path: dest,
            branch,
            remote_url: redacted,
        })
    }

    /// Working tree status of the session workspace.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or a git failure.
    pub async fn status(&self, session_id: &str) -> WsResult<Status> {
        let path = self.workspaces.require_repo(session_id)?;

        let modified = self.git.changed_files(&path, false).await?;
        let staged = self.git.changed_files(&path, true).await?;
        let untracked = self.git.untracked_files(&path).await?;
        let commit_count = self.git.commit_count(&path, None).await?;

        Ok(Status {
            branch: query::current_branch(&path)?,
            is_dirty: !modified.is_empty() || !staged.is_empty(),
            modified,
            untracked,
            staged,
            commit_count,
        })
    }

    /// Every workspace under the base directory, sorted by id.
    ///
    /// Workspaces that cannot be read are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the base directory cannot be listed.
    pub async fn list_workspaces(&self) -> WsResult<WorkspaceList> {
        let base = self.workspaces.base_dir();
        let mut workspaces = Vec::new();

        if !base.is_dir() {
            return Ok(WorkspaceList { workspaces });
        }

        let mut entries = tokio::fs::read_dir(base)
            .await
            .map_err(|e| FsError::io(base, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FsError::io(base, e))?
        {
            let path = entry.path();
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !validate_session_id(&id) || !query::is_git_repo(&path) {
                continue;
            }
            match self.summarize(&id, &path).await {
                Ok(summary) => workspaces.push(summary),
                Err(e) => warn!(workspace = %id, error = %e, "Skipping unreadable workspace"),
            }
        }

        workspaces.sort_by(|a, b| a.workspace_id.cmp(&b.workspace_id));
        debug!(count = workspaces.len(), "Listed workspaces");
        Ok(WorkspaceList { workspaces })
    }

    async fn summarize(&self, id: &str, path: &Path) -> WsResult<WorkspaceSummary> {
        let remote_url = self.git.remote_url(path, DEFAULT_REMOTE).await?;
        let name = remote_url
            .as_deref()
            .and_then(url::repo_name)
            .unwrap_or_else(|| id.to_string());
        let modified = self.git.changed_files(path, false).await?;
        let staged = self.git.changed_files(path, true).await?;

        Ok(WorkspaceSummary {
            workspace_id: id.to_string(),
            name,
            path: path.to_path_buf(),
            branch: query::current_branch(path)?,
            remote_url: remote_url.as_deref().map(url::redact),
            is_dirty: !modified.is_empty() || !staged.is_empty(),
            has_stash: query::has_stashed_changes(path)?,
            commit_count: self
                .git
                .commit_count(path, Some(WORKSPACE_COMMIT_CAP))
                .await?,
        })
    }
}

/// Remove a directory tree, or a file or symlink planted in its place.
async fn remove_path(path: &Path) -> WsResult<()> {
    let meta = tokio::fs::symlink_metadata(path)
        .await
        .map_err(|e| FsError::io(path, e))?;
    let result = if meta.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    result.map_err(|e| FsError::io(path, e).into())
}

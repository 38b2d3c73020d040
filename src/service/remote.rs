// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push, pull and credential configuration.
//!
//! ```text
//! push/pull fails --> AuthFailure::classify(stderr)
//!                        |                 |
//!                      Some              None
//!                        v                 v
//!              GitError::Auth       GitError::RemoteFailed
//!      "Authentication required"    git's message
//!      "Authentication failed"      + generic hint
//!      "Permission denied"
//!      + remediation hint
//! ```
//!
//! Credentials are embedded in the `origin` URL. The token is never logged
//! and every URL leaving this module is redacted.

use tracing::{info, warn};

use super::types::{CredentialsConfigured, Synced};
use super::{DEFAULT_REMOTE, GitService};
use crate::error::{
    AuthFailure, GitError, PreconditionError, RemoteOp, ValidationError, WsResult,
};
use crate::git::{query, url};
use crate::workspace::validate::{check_argument, check_branch};

impl GitService {
    /// Push `branch` (default: the current branch) to `remote` (default
    /// `origin`).
    ///
    /// # Errors
    ///
    /// `PreconditionError::NoRemote` unless `remote` is configured in the
    /// workspace; `ValidationError::InvalidArgument` for a refspec-shaped
    /// branch; `PreconditionError::DetachedHead` when no branch is given and
    /// HEAD is detached; `GitError::Auth` for recognized credential problems;
    /// `GitError::RemoteFailed` otherwise.
    pub async fn push(
        &self,
        session_id: &str,
        remote: Option<&str>,
        branch: Option<&str>,
    ) -> WsResult<Synced> {
        self.sync(RemoteOp::Push, session_id, remote, branch).await
    }

    /// Pull `branch` (default: the current branch) from `remote` (default
    /// `origin`) with a merge.
    ///
    /// # Errors
    ///
    /// Same as [`Self::push`].
    pub async fn pull(
        &self,
        session_id: &str,
        remote: Option<&str>,
        branch: Option<&str>,
    ) -> WsResult<Synced> {
        self.sync(RemoteOp::Pull, session_id, remote, branch).await
    }

    async fn sync(
        &self,
        op: RemoteOp,
        session_id: &str,
        remote: Option<&str>,
        branch: Option<&str>,
    ) -> WsResult<Synced> {
        let path = self.workspaces.require_repo(session_id)?;
        let remote = remote.unwrap_or(DEFAULT_REMOTE);
        check_argument("remote", remote)?;
        if let Some(b) = branch {
            check_branch("branch", b)?;
        }
        // Configured remotes only; git itself would accept any path or URL.
        if self.git.remote_url(&path, remote).await?.is_none() {
            warn!(session = session_id, %op, remote, "Unknown remote");
            return Err(PreconditionError::NoRemote.into());
        }

        let branch = match branch {
            Some(b) => b.to_string(),
            None => query::current_branch(&path)?.ok_or(PreconditionError::DetachedHead)?,
        };

        info!(session = session_id, %op, remote, branch = %branch, "Contacting remote");
        let output = match op {
            RemoteOp::Push => self.git.push(&path, remote, &branch).await?,
            RemoteOp::Pull => self.git.pull(&path, remote, &branch).await?,
        };

        if !output.success {
            let message = url::redact(&output.message());
            let err = match AuthFailure::classify(&message) {
                Some(failure) => {
                    warn!(session = session_id, %op, %failure, "Remote rejected credentials");
                    GitError::Auth {
                        op,
                        failure,
                        detail: message,
                    }
                }
                None => {
                    warn!(session = session_id, %op, error = %message, "Remote operation failed");
                    GitError::RemoteFailed { op, message }
                }
            };
            return Err(err.into());
        }

        let message = match op {
            RemoteOp::Push => format!("Pushed to {remote}/{branch}"),
            RemoteOp::Pull => format!("Pulled from {remote}/{branch}"),
        };
        Ok(Synced {
            message,
            remote: remote.to_string(),
            branch,
        })
    }

    /// Embed `github_username:github_token` into the `origin` URL.
    ///
    /// Only `https://github.com/...` remotes are accepted; credentials
    /// already present are replaced.
    ///
    /// # Errors
    ///
    /// `PreconditionError::NoRemote` without an `origin`;
    /// `ValidationError::UnsupportedRemote` for any other URL form;
    /// `ValidationError::InvalidArgument` for credentials that cannot be
    /// embedded in a URL.
    pub async fn configure_credentials(
        &self,
        session_id: &str,
        github_token: &str,
        github_username: &str,
    ) -> WsResult<CredentialsConfigured> {
        let path = self.workspaces.require_repo(session_id)?;
        check_credential("GitHub username", github_username, true)?;
        check_credential("GitHub token", github_token, false)?;

        let current = self
            .git
            .remote_url(&path, DEFAULT_REMOTE)
            .await?
            .ok_or(PreconditionError::NoRemote)?;
        let Some(repo_path) = url::github_https_path(&current) else {
            return Err(ValidationError::UnsupportedRemote {
                current_url: url::redact(&current),
            }
            .into());
        };

        let authenticated = url::with_credentials(repo_path, github_username, github_token);
        self.git
            .set_remote_url(&path, DEFAULT_REMOTE, &authenticated)
            .await?;
        info!(
            session = session_id,
            remote = DEFAULT_REMOTE,
            username = github_username,
            "Configured remote credentials"
        );

        Ok(CredentialsConfigured {
            message: "Git credentials configured successfully".to_string(),
            note: "You can now push and pull from private repositories".to_string(),
        })
    }
}

/// Reject values that would change the meaning of a `user:token@host` URL.
fn check_credential(what: &'static str, value: &str, reveal: bool) -> WsResult<()> {
    let unsafe_char = |c: char| {
        c.is_control() || c.is_whitespace() || matches!(c, '@' | ':' | '/' | '?' | '#' | '%')
    };
    if value.is_empty() || value.chars().any(unsafe_char) {
        return Err(ValidationError::InvalidArgument {
            what,
            value: if reveal {
                value.escape_debug().to_string()
            } else {
                "***".to_string()
            },
        }
        .into());
    }
    Ok(())
}

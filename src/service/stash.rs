// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stash save, list, apply and pop.

use tracing::info;

use super::GitService;
use super::types::{Done, Stashes};
use crate::error::WsResult;

impl GitService {
    /// Stash local changes, untracked files included when asked.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or git's message.
    pub async fn stash(
        &self,
        session_id: &str,
        message: Option<&str>,
        include_untracked: bool,
    ) -> WsResult<Done> {
        let path = self.workspaces.require_repo(session_id)?;
        self.git
            .stash_push(&path, message, include_untracked)
            .await?;
        info!(session = session_id, include_untracked, "Stashed changes");
        Ok(Done {
            message: "Changes stashed successfully".to_string(),
        })
    }

    /// Stash entries in `git stash list` form, newest first.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or git's message.
    pub async fn list_stashes(&self, session_id: &str) -> WsResult<Stashes> {
        let path = self.workspaces.require_repo(session_id)?;
        Ok(Stashes {
            stashes: self.git.stash_list(&path).await?,
        })
    }

    /// Apply `stash@{index}` and keep it.
    ///
    /// # Errors
    ///
    /// git's message when the entry does not exist or does not apply.
    pub async fn apply_stash(&self, session_id: &str, index: usize) -> WsResult<Done> {
        let path = self.workspaces.require_repo(session_id)?;
        self.git.stash_apply(&path, index, false).await?;
        info!(session = session_id, index, "Applied stash");
        Ok(Done {
            message: format!("Stash {index} applied successfully"),
        })
    }

    /// Apply `stash@{index}` and drop it.
    ///
    /// # Errors
    ///
    /// git's message when the entry does not exist or does not apply.
    pub async fn pop_stash(&self, session_id: &str, index: usize) -> WsResult<Done> {
        let path = self.workspaces.require_repo(session_id)?;
        self.git.stash_apply(&path, index, true).await?;
        info!(session = session_id, index, "Popped stash");
        Ok(Done {
            message: format!("Stash {index} popped successfully"),
        })
    }
}

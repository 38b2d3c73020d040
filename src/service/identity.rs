// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git user identity.
//!
//! ```text
//! get_user_config:  global user.name+email?  --yes--> scope=global
//!                          | no
//!                   workspace exists?        --no---> not configured (no global)
//!                          | yes
//!                   local user.name+email?   --yes--> scope=repository
//!                          | no
//!                   not configured
//! ```

use std::path::Path;

use tracing::info;

use super::GitService;
use super::types::UserIdentity;
use crate::error::{PreconditionError, WsResult};
use crate::git::{ConfigScope, query};
use crate::workspace::validate::check_author;

impl GitService {
    /// Set `user.name` and `user.email` in the workspace or global config.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidAuthor`; `PreconditionError::NoRepository`
    /// for repository scope without a workspace; git's message.
    pub async fn configure_user(
        &self,
        session_id: &str,
        name: &str,
        email: &str,
        scope: ConfigScope,
    ) -> WsResult<UserIdentity> {
        self.workspaces.resolve(session_id)?;
        check_author(name, email)?;
        let cwd = match scope {
            ConfigScope::Repository => self.workspaces.require_repo(session_id)?,
            ConfigScope::Global => self.workspaces.base_dir().to_path_buf(),
        };

        self.git.config_set(&cwd, scope, "user.name", name).await?;
        self.git.config_set(&cwd, scope, "user.email", email).await?;
        info!(session = session_id, %scope, "Configured git user");

        Ok(UserIdentity {
            message: Some(format!("Git user configured ({scope})")),
            name: name.to_string(),
            email: email.to_string(),
            scope,
        })
    }

    /// Effective identity: global first, then the workspace's own config.
    ///
    /// # Errors
    ///
    /// `PreconditionError::UserNotConfigured`, flagged `global_missing` when
    /// there is no workspace to fall back to.
    pub async fn get_user_config(&self, session_id: &str) -> WsResult<UserIdentity> {
        let path = self.workspaces.resolve(session_id)?;

        if let Some(identity) = self
            .read_identity(self.workspaces.base_dir(), ConfigScope::Global)
            .await?
        {
            return Ok(identity);
        }
        if !query::is_git_repo(&path) {
            return Err(PreconditionError::UserNotConfigured {
                global_missing: true,
            }
            .into());
        }
        if let Some(identity) = self.read_identity(&path, ConfigScope::Repository).await? {
            return Ok(identity);
        }
        Err(PreconditionError::UserNotConfigured {
            global_missing: false,
        }
        .into())
    }

    async fn read_identity(&self, cwd: &Path, scope: ConfigScope) -> WsResult<Option<UserIdentity>> {
        let name = self.git.config_get(cwd, scope, "user.name").await?;
        let email = self.git.config_get(cwd, scope, "user.email").await?;
        Ok(name.zip(email).map(|(name, email)| UserIdentity {
            message: None,
            name,
            email,
            scope,
        }))
    }
}

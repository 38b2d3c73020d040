// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository operations per session workspace.
//!
//! ```text
//! GitService::op(session_id, ..)
//!      |
//!      v
//! Workspaces::resolve / require_repo     (validate.rs, resolver.rs)
//!      |
//!      v
//! argument + path checks                 (before any git call)
//!      |
//!      v
//! GitCli (write, network) / query (gix)  (git/)
//!      |
//!      v
//! WsResult<Payload> --> Envelope<Payload>
//! ```
//!
//! | file        | operations                                        |
//! |-------------|---------------------------------------------------|
//! | repo.rs     | clone, status, list workspaces                    |
//! | history.rs  | commit, log, diff, reset, tags                    |
//! | branch.rs   | list / create / checkout branch, merge            |
//! | stash.rs    | stash, list, apply, pop                           |
//! | remote.rs   | push, pull, credentials                           |
//! | files.rs    | file tree, read, write                            |
//! | identity.rs | configure user, get user config                   |
//!
//! The service holds no per-workspace state; every call reopens the
//! repository. Concurrent calls on one workspace rely on git's own lock
//! files.

mod branch;
mod files;
mod history;
mod identity;
mod remote;
mod repo;
mod stash;
pub mod types;

pub use repo::WORKSPACE_COMMIT_CAP;
pub use types::*;

use tracing::info;

use crate::config::Config;
use crate::error::WsResult;
use crate::git::GitCli;
use crate::workspace::Workspaces;

/// Default remote for push, pull and credential configuration.
pub const DEFAULT_REMOTE: &str = "origin";

/// Default number of commits returned by [`GitService::commit_log`].
pub const DEFAULT_LOG_COUNT: usize = 50;

/// Git workspace manager bound to one base directory.
#[derive(Debug, Clone)]
pub struct GitService {
    workspaces: Workspaces,
    git: GitCli,
}

impl GitService {
    /// Create the base directory if needed and locate git.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the base directory cannot be created, or
    /// `GitError::ExecutableNotFound`.
    pub fn new(config: &Config) -> WsResult<Self> {
        let workspaces = Workspaces::new(config.workspace.base_dir.clone());
        workspaces.ensure_base_dir()?;
        let git = GitCli::new(
            &config.git.executable,
            config.git.global_config.clone(),
            config.git.network_timeout(),
        )?;
        info!(
            base_dir = %workspaces.base_dir().display(),
            git = %git.program().display(),
            "Workspace service ready"
        );
        Ok(Self { workspaces, git })
    }

    #[must_use]
    pub const fn workspaces(&self) -> &Workspaces {
        &self.workspaces
    }

    #[must_use]
    pub const fn git(&self) -> &GitCli {
        &self.git
    }
}

#[cfg(test)]
mod tests;

// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session id to workspace directory mapping.
//!
//! ```text
//! session id --validate--> <base_dir>/<session id>
//!                              |
//!                 require_repo: must be a git work tree root
//! ```

use std::path::{Path, PathBuf};

use super::validate::validate_session_id;
use crate::error::{FsError, PreconditionError, ValidationError, WsResult};
use crate::git::query;

/// Root directory holding one working tree per session.
#[derive(Debug, Clone)]
pub struct Workspaces {
    base_dir: PathBuf,
}

impl Workspaces {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the directory cannot be created.
    pub fn ensure_base_dir(&self) -> WsResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| FsError::io(&self.base_dir, e))?;
        Ok(())
    }

    /// Workspace directory for `session_id`, or `None` if the id is invalid.
    ///
    /// Existence is not checked.
    #[must_use]
    pub fn repo_path_for(&self, session_id: &str) -> Option<PathBuf> {
        validate_session_id(session_id).then(|| self.base_dir.join(session_id))
    }

    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSessionId` for a malformed id.
    pub fn resolve(&self, session_id: &str) -> WsResult<PathBuf> {
        self.repo_path_for(session_id)
            .ok_or_else(|| ValidationError::InvalidSessionId.into())
    }

    /// Workspace directory that must already hold a repository.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSessionId` or
    /// `PreconditionError::NoRepository`.
    pub fn require_repo(&self, session_id: &str) -> WsResult<PathBuf> {
        let path = self.resolve(session_id)?;
        if !query::is_git_repo(&path) {
            return Err(PreconditionError::NoRepository.into());
        }
        Ok(path)
    }
}

// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository queries.
//!
//! ```text
//! GitQuery (read) --> GixBackend (pure Rust gix, no subprocess)
//! writes          --> GitCli (git CLI, see runner.rs / cmd.rs)
//! ```
//!
//! Workspaces are opened exactly at their root: a workspace directory that
//! lacks its own `.git` is never resolved to an enclosing repository.

use crate::error::{GitError, GixError, WsResult};
use std::path::Path;

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if `path` is the root of a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// An unborn branch still reports its name.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(path: &Path) -> WsResult<Option<String>>;

    /// Check for stashed changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or the lookup fails.
    fn has_stashed_changes(path: &Path) -> WsResult<bool>;
}

/// Pure Rust git backend using gix.
pub struct GixBackend;

fn open(path: &Path) -> WsResult<gix::Repository> {
    gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))).into())
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        path.join(".git").exists() && gix::open(path).is_ok()
    }

    fn current_branch(path: &Path) -> WsResult<Option<String>> {
        let repo = open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_stashed_changes(path: &Path) -> WsResult<bool> {
        let repo = open(path)?;

        // refs/stash exists iff there are stashed changes
        match repo.find_reference("refs/stash") {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { name: _ }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Head(e)).into()),
        }
    }
}

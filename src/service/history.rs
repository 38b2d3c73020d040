// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit, history, diff, reset and tags.

use tracing::{info, warn};

use super::GitService;
use super::types::{CommitLog, Committed, Diff, ResetDone, TagCreated, Tags};
use crate::error::{ValidationError, WsResult};
use crate::git::ResetMode;
use crate::workspace::validate::{
    check_argument, check_author, check_optional, resolve_worktree_file, validate_file_path,
};

const SHORT_HASH_LEN: usize = 7;

impl GitService {
    /// Stage `files` (or everything when `None` or empty) and commit as
    /// `author_name <author_email>`.
    ///
    /// Every listed file is validated before anything is staged; one bad
    /// path rejects the whole commit.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidCommitPath` naming the first rejected file,
    /// `ValidationError::InvalidAuthor`, or git's message (e.g. nothing to
    /// commit).
    pub async fn commit(
        &self,
        session_id: &str,
        message: &str,
        author_name: &str,
        author_email: &str,
        files: Option<&[String]>,
    ) -> WsResult<Committed> {
        let path = self.workspaces.require_repo(session_id)?;
        check_author(author_name, author_email)?;

        match files.filter(|f| !f.is_empty()) {
            Some(files) => {
                if let Some(bad) = files
                    .iter()
                    .find(|f| !validate_file_path(f) || resolve_worktree_file(&path, f).is_err())
                {
                    warn!(session = session_id, file = %bad.escape_debug(), "Rejected commit path");
                    return Err(ValidationError::InvalidCommitPath(bad.clone()).into());
                }
                let files: Vec<&str> = files.iter().map(String::as_str).collect();
                self.git.stage(&path, &files).await?;
            }
            None => self.git.stage_all(&path).await?,
        }

        let commit_hash = self
            .git
            .commit(&path, message, author_name, author_email)
            .await?;
        info!(
            session = session_id,
            commit = %commit_hash.get(..SHORT_HASH_LEN).unwrap_or(commit_hash.as_str()),
            "Committed changes"
        );

        Ok(Committed {
            message: "Changes committed successfully".to_string(),
            commit_hash,
            commit_message: message.to_string(),
            author: format!("{author_name} <{author_email}>"),
        })
    }

    /// Up to `max_count` commits of HEAD or `branch`, newest first.
    ///
    /// # Errors
    ///
    /// Validation errors for `branch`; git's message for unknown refs or an
    /// unborn branch.
    pub async fn commit_log(
        &self,
        session_id: &str,
        max_count: usize,
        branch: Option<&str>,
    ) -> WsResult<CommitLog> {
        let path = self.workspaces.require_repo(session_id)?;
        check_optional("branch", branch)?;

        let commits = self.git.log(&path, max_count, branch).await?;
        Ok(CommitLog {
            count: commits.len(),
            commits,
        })
    }

    /// Raw diff text. See [`crate::git::GitCli::diff`] for how the refs combine.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidFilePath` for a bad `file_path`, validation
    /// errors for the refs, git's message for unknown refs.
    pub async fn diff(
        &self,
        session_id: &str,
        commit1: Option<&str>,
        commit2: Option<&str>,
        file_path: Option<&str>,
    ) -> WsResult<Diff> {
        self.workspaces.resolve(session_id)?;
        if file_path.is_some_and(|p| !validate_file_path(p)) {
            return Err(ValidationError::InvalidFilePath.into());
        }
        let path = self.workspaces.require_repo(session_id)?;
        check_optional("commit", commit1)?;
        check_optional("commit", commit2)?;

        let diff = self.git.diff(&path, commit1, commit2, file_path).await?;
        Ok(Diff { diff })
    }

    /// Move the current branch to `commit` (default `HEAD`).
    ///
    /// `mode` must be `soft`, `mixed` or `hard`; anything else is rejected
    /// before git runs.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidResetMode`, validation errors for `commit`,
    /// git's message for unknown refs.
    pub async fn reset(
        &self,
        session_id: &str,
        mode: &str,
        commit: Option<&str>,
    ) -> WsResult<ResetDone> {
        let path = self.workspaces.require_repo(session_id)?;
        let mode: ResetMode = mode.parse()?;
        let commit = commit.unwrap_or("HEAD");
        check_argument("commit", commit)?;

        self.git.reset(&path, mode, commit).await?;
        info!(session = session_id, %mode, %commit, "Reset branch");

        Ok(ResetDone {
            message: format!("Reset to {commit} ({mode} mode)"),
            mode,
            commit: commit.to_string(),
        })
    }

    /// Tag `commit` (default `HEAD`); annotated when `message` is given.
    ///
    /// # Errors
    ///
    /// Validation errors for the tag name or commit; git's message when the
    /// tag already exists.
    pub async fn create_tag(
        &self,
        session_id: &str,
        tag_name: &str,
        message: Option<&str>,
        commit: Option<&str>,
    ) -> WsResult<TagCreated> {
        let path = self.workspaces.require_repo(session_id)?;
        let commit = commit.unwrap_or("HEAD");
        check_argument("tag", tag_name)?;
        check_argument("commit", commit)?;

        self.git.create_tag(&path, tag_name, message, commit).await?;
        info!(session = session_id, tag = tag_name, %commit, "Created tag");

        Ok(TagCreated {
            message: format!("Tag '{tag_name}' created successfully"),
            tag: tag_name.to_string(),
            commit: commit.to_string(),
        })
    }

    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or a git failure.
    pub async fn list_tags(&self, session_id: &str) -> WsResult<Tags> {
        let path = self.workspaces.require_repo(session_id)?;
        let tags = self.git.tags(&path).await?;
        Ok(Tags {
            count: tags.len(),
            tags,
        })
    }
}

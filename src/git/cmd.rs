// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using the CLI.
//!
//! ```text
//! cmd.rs --> GitCli (runner.rs) --> git (subprocess)
//!
//! clone  add  commit  push  pull  branch  checkout  stash
//! log    diff merge   reset tag   config  remote
//! ```
//!
//! Thin, typed wrappers. Callers validate refs and paths first; file paths
//! always follow `--`.

use serde::Serialize;
use std::path::Path;

use super::log::{CommitInfo, LOG_FORMAT, parse_log};
use super::runner::{GitCli, GitOutput};
use crate::error::{GitError, ValidationError, WsResult};

/// Where `git config` reads or writes user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    Repository,
    Global,
}

impl ConfigScope {
    const fn flag(self) -> &'static str {
        match self {
            Self::Repository => "--local",
            Self::Global => "--global",
        }
    }
}

impl std::fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository => write!(f, "repository"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// `git reset` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    Soft,
    #[default]
    Mixed,
    Hard,
}

impl ResetMode {
    const fn flag(self) -> &'static str {
        match self {
            Self::Soft => "--soft",
            Self::Mixed => "--mixed",
            Self::Hard => "--hard",
        }
    }
}

impl std::fmt::Display for ResetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Mixed => write!(f, "mixed"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for ResetMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" => Ok(Self::Soft),
            "mixed" => Ok(Self::Mixed),
            "hard" => Ok(Self::Hard),
            _ => Err(ValidationError::InvalidResetMode(s.to_string())),
        }
    }
}

fn split_nul(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn stash_ref(index: usize) -> String {
    format!("stash@{{{index}}}")
}

impl GitCli {
    // --- Clone ---

    /// Clone `url` into `dest` (which must not exist yet).
    ///
    /// # Errors
    ///
    /// Returns `GitError::CloneFailed` with git's message, or `GitError::TimedOut`.
    pub async fn clone_into(&self, url: &str, dest: &Path, branch: Option<&str>) -> WsResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let mut args = vec!["-c", "protocol.ext.allow=never", "clone", "--quiet"];
        if let Some(b) = branch {
            args.extend(["--branch", b]);
        }
        args.extend(["--", url, dest_str]);

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        let output = self.output_network(&args, parent).await?;
        if output.success {
            Ok(())
        } else {
            Err(GitError::CloneFailed {
                url: super::url::redact(url),
                message: super::url::redact(&output.message()),
            }
            .into())
        }
    }

    // --- Status ---

    /// Paths with changes between the index and the worktree, or between
    /// HEAD and the index when `cached`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn changed_files(&self, repo: &Path, cached: bool) -> WsResult<Vec<String>> {
        let mut args = vec!["diff", "--name-only", "-z"];
        if cached {
            args.push("--cached");
        }
        Ok(split_nul(&self.run(&args, repo).await?))
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn untracked_files(&self, repo: &Path) -> WsResult<Vec<String>> {
        let out = self
            .run(&["ls-files", "--others", "--exclude-standard", "-z"], repo)
            .await?;
        Ok(split_nul(&out))
    }

    /// Number of commits reachable from HEAD, optionally capped. Zero for an
    /// unborn branch.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if git cannot be spawned.
    pub async fn commit_count(&self, repo: &Path, cap: Option<usize>) -> WsResult<usize> {
        let cap_arg = cap.map(|n| format!("--max-count={n}"));
        let mut args = vec!["rev-list", "--count"];
        if let Some(arg) = &cap_arg {
            args.push(arg);
        }
        args.push("HEAD");
        let output = self.output(&args, repo).await?;
        if !output.success {
            return Ok(0);
        }
        Ok(output.stdout.trim().parse().unwrap_or(0))
    }

    // --- Commit ---

    /// Stage exactly `files`; glob characters and pathspec magic are literal.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if any path cannot be staged.
    pub async fn stage(&self, repo: &Path, files: &[&str]) -> WsResult<()> {
        let mut args = vec!["--literal-pathspecs", "add", "--"];
        args.extend_from_slice(files);
        self.run(&args, repo).await?;
        Ok(())
    }

    /// Stage every change, including deletions and untracked files.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn stage_all(&self, repo: &Path) -> WsResult<()> {
        self.run(&["add", "-A"], repo).await?;
        Ok(())
    }

    /// Commit the index as `name <email>` (author and committer) and return
    /// the new commit hash.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed`, e.g. when there is nothing to commit.
    pub async fn commit(
        &self,
        repo: &Path,
        message: &str,
        name: &str,
        email: &str,
    ) -> WsResult<String> {
        let author = format!("{name} <{email}>");
        let envs = [
            ("GIT_AUTHOR_NAME", name),
            ("GIT_AUTHOR_EMAIL", email),
            ("GIT_COMMITTER_NAME", name),
            ("GIT_COMMITTER_EMAIL", email),
        ];
        self.run_with_env(
            &["commit", "--quiet", "-m", message, "--author", &author],
            repo,
            &envs,
        )
        .await?;
        self.rev_parse(repo, "HEAD").await
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if `rev` does not resolve.
    pub async fn rev_parse(&self, repo: &Path, rev: &str) -> WsResult<String> {
        self.run(&["rev-parse", "--verify", rev], repo).await
    }

    // --- Remote ---

    /// Push `branch` to `remote`; the caller interprets failure.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TimedOut` or an I/O error.
    pub async fn push(&self, repo: &Path, remote: &str, branch: &str) -> WsResult<GitOutput> {
        self.output_network(
            &["-c", "protocol.ext.allow=never", "push", remote, branch],
            repo,
        )
        .await
    }

    /// Pull `branch` from `remote` with a merge; the caller interprets failure.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TimedOut` or an I/O error.
    pub async fn pull(&self, repo: &Path, remote: &str, branch: &str) -> WsResult<GitOutput> {
        self.output_network(
            &[
                "-c",
                "protocol.ext.allow=never",
                "pull",
                "--no-rebase",
                "--no-edit",
                remote,
                branch,
            ],
            repo,
        )
        .await
    }

    /// URL of `remote`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if git cannot be spawned.
    pub async fn remote_url(&self, repo: &Path, remote: &str) -> WsResult<Option<String>> {
        let output = self.output(&["remote", "get-url", remote], repo).await?;
        Ok(output
            .success
            .then(|| output.stdout.trim().to_string())
            .filter(|url| !url.is_empty()))
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn set_remote_url(&self, repo: &Path, remote: &str, url: &str) -> WsResult<()> {
        self.run(&["remote", "set-url", remote, url], repo).await?;
        Ok(())
    }

    // --- Branches ---

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn local_branches(&self, repo: &Path) -> WsResult<Vec<String>> {
        let out = self
            .run(
                &["for-each-ref", "--format=%(refname:short)", "refs/heads/"],
                repo,
            )
            .await?;
        Ok(split_lines(&out))
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed`, e.g. if the branch already exists.
    pub async fn create_branch(&self, repo: &Path, name: &str) -> WsResult<()> {
        self.run(&["branch", name], repo).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the checkout fails.
    pub async fn checkout(&self, repo: &Path, what: &str) -> WsResult<()> {
        self.run(
            &["-c", "advice.detachedHead=false", "checkout", "--quiet", what, "--"],
            repo,
        )
        .await?;
        Ok(())
    }

    /// Merge `branch` into HEAD; the caller interprets failure.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if git cannot be spawned.
    pub async fn merge(
        &self,
        repo: &Path,
        branch: &str,
        message: Option<&str>,
    ) -> WsResult<GitOutput> {
        let mut args = vec!["merge", "--no-edit"];
        if let Some(m) = message {
            args.extend(["-m", m]);
        }
        args.push(branch);
        self.output(&args, repo).await
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if `commit` does not resolve.
    pub async fn reset(&self, repo: &Path, mode: ResetMode, commit: &str) -> WsResult<()> {
        self.run(&["reset", "--quiet", mode.flag(), commit, "--"], repo)
            .await?;
        Ok(())
    }

    // --- Stash ---

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn stash_push(
        &self,
        repo: &Path,
        message: Option<&str>,
        include_untracked: bool,
    ) -> WsResult<()> {
        let mut args = vec!["stash", "push", "--quiet"];
        if include_untracked {
            args.push("--include-untracked");
        }
        if let Some(m) = message {
            args.extend(["-m", m]);
        }
        self.run(&args, repo).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn stash_list(&self, repo: &Path) -> WsResult<Vec<String>> {
        Ok(split_lines(&self.run(&["stash", "list"], repo).await?))
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the stash entry does not exist or
    /// does not apply cleanly.
    pub async fn stash_apply(&self, repo: &Path, index: usize, drop: bool) -> WsResult<()> {
        let verb = if drop { "pop" } else { "apply" };
        self.run(&["stash", verb, "--quiet", &stash_ref(index)], repo)
            .await?;
        Ok(())
    }

    // --- History ---

    /// Newest-first history of HEAD or `branch`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed`, e.g. for an unknown branch.
    pub async fn log(
        &self,
        repo: &Path,
        max_count: usize,
        branch: Option<&str>,
    ) -> WsResult<Vec<CommitInfo>> {
        let max = format!("--max-count={max_count}");
        let mut args = vec!["log", max.as_str(), LOG_FORMAT];
        if let Some(b) = branch {
            args.push(b);
        }
        args.push("--");
        Ok(parse_log(&self.run(&args, repo).await?))
    }

    /// Raw diff text. No refs: worktree against index. One ref: worktree
    /// against it. Two refs: between them.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` for unknown refs.
    pub async fn diff(
        &self,
        repo: &Path,
        from: Option<&str>,
        to: Option<&str>,
        file: Option<&str>,
    ) -> WsResult<String> {
        let mut args = vec!["--literal-pathspecs", "diff", "--no-color"];
        args.extend(from);
        args.extend(to);
        if let Some(f) = file {
            args.extend(["--", f]);
        }
        self.run(&args, repo).await
    }

    // --- Tags ---

    /// Lightweight tag, or annotated when `message` is set.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed`, e.g. if the tag exists.
    pub async fn create_tag(
        &self,
        repo: &Path,
        name: &str,
        message: Option<&str>,
        commit: &str,
    ) -> WsResult<()> {
        let mut args = vec!["tag"];
        if let Some(m) = message {
            args.extend(["-a", "-m", m]);
        }
        args.extend([name, commit]);
        self.run(&args, repo).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git fails.
    pub async fn tags(&self, repo: &Path) -> WsResult<Vec<String>> {
        Ok(split_lines(&self.run(&["tag", "--list"], repo).await?))
    }

    // --- Config ---

    /// Value of `key` in `scope`, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if git cannot be spawned.
    pub async fn config_get(
        &self,
        cwd: &Path,
        scope: ConfigScope,
        key: &str,
    ) -> WsResult<Option<String>> {
        let output = self
            .output(&["config", scope.flag(), "--get", key], cwd)
            .await?;
        Ok(output
            .success
            .then(|| output.stdout.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if the config file cannot be written.
    pub async fn config_set(
        &self,
        cwd: &Path,
        scope: ConfigScope,
        key: &str,
        value: &str,
    ) -> WsResult<()> {
        self.run(&["config", scope.flag(), key, value], cwd).await?;
        Ok(())
    }
}

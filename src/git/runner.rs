// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git subprocess runner.
//!
//! ```text
//! GitCli::run(args, cwd)
//!        |
//!        v
//!   tokio::process::Command
//!   env: GIT_TERMINAL_PROMPT=0  GCM_INTERACTIVE=never
//!        LC_ALL=C  [GIT_CONFIG_GLOBAL]
//!   stdin: null   kill_on_drop
//!        |
//!        v
//!   [timeout]  (network commands only, opt-in)
//!        |
//!        v
//!   GitOutput { success, stdout, stderr }
//! ```
//!
//! Arguments are passed as a vector, never through a shell.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use super::url::redact;
use crate::error::{GitError, WsResult};

/// Captured result of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Git's diagnostic text: stderr, or stdout when stderr is empty
    /// (`commit` and `merge` report on stdout).
    #[must_use]
    pub fn message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }

    /// Both streams, for pattern matching on either.
    #[must_use]
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Handle on the git executable plus the environment every call shares.
///
/// Cheap to clone; holds no repository state.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    global_config: Option<PathBuf>,
    network_timeout: Option<Duration>,
}

impl GitCli {
    /// Locate the git executable.
    ///
    /// # Errors
    ///
    /// Returns `GitError::ExecutableNotFound` if `executable` cannot be resolved.
    pub fn new(
        executable: &Path,
        global_config: Option<PathBuf>,
        network_timeout: Option<Duration>,
    ) -> WsResult<Self> {
        let program = which::which(executable).map_err(|_| GitError::ExecutableNotFound {
            name: executable.display().to_string(),
        })?;
        debug!(git = %program.display(), "resolved git executable");
        Ok(Self {
            program,
            global_config,
            network_timeout,
        })
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub const fn network_timeout(&self) -> Option<Duration> {
        self.network_timeout
    }

    fn command(&self, args: &[&str], cwd: &Path, envs: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(global) = &self.global_config {
            cmd.env("GIT_CONFIG_GLOBAL", global);
        }
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run git and capture its output regardless of exit status.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if the process cannot be spawned.
    pub async fn output_with_env(
        &self,
        args: &[&str],
        cwd: &Path,
        envs: &[(&str, &str)],
    ) -> WsResult<GitOutput> {
        trace!(cwd = %cwd.display(), "{}", display_command(args));
        let output = self.command(args, cwd, envs).output().await?;
        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns an I/O error only if the process cannot be spawned.
    pub async fn output(&self, args: &[&str], cwd: &Path) -> WsResult<GitOutput> {
        self.output_with_env(args, cwd, &[]).await
    }

    /// Like [`Self::output`], bounded by the configured network timeout.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TimedOut` when the bound elapses; the child is
    /// killed when its future is dropped.
    pub async fn output_network(&self, args: &[&str], cwd: &Path) -> WsResult<GitOutput> {
        let Some(limit) = self.network_timeout else {
            return self.output(args, cwd).await;
        };
        tokio::time::timeout(limit, self.output(args, cwd))
            .await
            .map_err(|_| GitError::TimedOut {
                command: args.first().copied().unwrap_or("git").to_string(),
                timeout_secs: limit.as_secs(),
            })?
    }

    /// Run git and return stdout with trailing whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` carrying git's message on non-zero exit.
    pub async fn run(&self, args: &[&str], cwd: &Path) -> WsResult<String> {
        let output = self.output(args, cwd).await?;
        into_stdout(args, output)
    }

    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` carrying git's message on non-zero exit.
    pub async fn run_with_env(
        &self,
        args: &[&str],
        cwd: &Path,
        envs: &[(&str, &str)],
    ) -> WsResult<String> {
        let output = self.output_with_env(args, cwd, envs).await?;
        into_stdout(args, output)
    }
}

fn into_stdout(args: &[&str], output: GitOutput) -> WsResult<String> {
    if output.success {
        Ok(output.stdout.trim_end().to_string())
    } else {
        Err(GitError::CommandFailed {
            command: display_command(args),
            message: redact(&output.message()),
        }
        .into())
    }
}

/// Command line for logs and errors, with URL credentials masked.
pub(crate) fn display_command(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(&redact(arg));
    }
    line
}

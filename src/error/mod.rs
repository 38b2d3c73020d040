// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            WorkspaceError (~24 bytes)
//!                     |
//!   +----------+------+------+------+------+
//!   |          |      |      |      |      |
//!   v          v      v      v      v      v
//! Validation Precond Git    Fs   Config   Io
//!   Box       Box    Box    Box   Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Validation   SessionId, FilePath, Escape, ResetMode, Argument
//!   Precondition NoRepository, NoRemote, UserNotConfigured, DetachedHead
//!   Git          CommandFailed, Auth, MergeConflict, TimedOut, Gix
//!   Fs           NotFound, NotAFile, NotText, IoError
//!
//! ErrorKind (closed):  validation | precondition | tool | io
//! ```
//!
//! Leaf `Display` strings are the exact user-facing messages carried in the
//! `error` field of the operation envelope.

use serde::Serialize;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WorkspaceError`].
pub type WsResult<T> = std::result::Result<T, WorkspaceError>;

/// Top-level error type for workspace operations.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Input rejected before touching the filesystem or git.
    #[error("{0}")]
    Validation(#[from] Box<ValidationError>),

    /// Workspace state does not allow the operation.
    #[error("{0}")]
    Precondition(#[from] Box<PreconditionError>),

    /// The git tool reported a failure.
    #[error("{0}")]
    Git(#[from] Box<GitError>),

    /// Filesystem operation failed.
    #[error("{0}")]
    Fs(#[from] Box<FsError>),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("{0}")]
    Io(Box<std::io::Error>),
}

/// Closed classification of [`WorkspaceError`] used by callers to branch
/// on the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Precondition,
    Tool,
    Io,
}

impl WorkspaceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Config(_) => ErrorKind::Validation,
            Self::Precondition(_) => ErrorKind::Precondition,
            Self::Git(_) => ErrorKind::Tool,
            Self::Fs(_) | Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Remediation message shown next to the error, if any.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Git(err) => err.hint(),
            Self::Precondition(err) => err.hint().map(str::to_string),
            Self::Validation(err) => err.hint(),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WorkspaceError {
                fn from(err: $error) -> Self {
                    WorkspaceError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ValidationError => Validation,
    PreconditionError => Precondition,
    GitError => Git,
    FsError => Fs,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Validation Errors ---

/// Inputs rejected by the path validator or argument checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid session ID")]
    InvalidSessionId,

    /// File path failed validation (read, write, diff).
    #[error("Invalid file path")]
    InvalidFilePath,

    /// One of the files listed for a commit failed validation.
    #[error("Invalid file path: {0}")]
    InvalidCommitPath(String),

    /// Path resolved outside the workspace.
    #[error("Access denied: file outside repository")]
    OutsideWorkspace,

    /// Path names the repository's `.git` directory, directly or via a symlink.
    #[error("Access denied: repository metadata is not accessible")]
    GitMetadata,

    #[error("Invalid reset mode. Use 'soft', 'mixed', or 'hard'")]
    InvalidResetMode(String),

    /// Ref, branch, tag, remote name or URL that git could read as an option.
    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Invalid author: {0}")]
    InvalidAuthor(String),

    #[error("Only HTTPS GitHub URLs are supported for credential configuration")]
    UnsupportedRemote { current_url: String },
}

impl ValidationError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::UnsupportedRemote { current_url } => {
                Some(format!("Current remote URL: {current_url}"))
            }
            _ => None,
        }
    }
}

// --- Precondition Errors ---

/// Workspace state that prevents an operation from running.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("No repository found for this session")]
    NoRepository,

    #[error("No remote repository configured")]
    NoRemote,

    #[error("Git user not configured")]
    UserNotConfigured { global_missing: bool },

    /// HEAD is detached and the operation needs a branch.
    #[error("HEAD is detached; specify a branch")]
    DetachedHead,
}

impl PreconditionError {
    const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UserNotConfigured {
                global_missing: true,
            } => Some("No global Git config found. Please configure your Git user."),
            _ => None,
        }
    }
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has multiple error types that are converted through this enum.
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Remote operation that may need credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Push,
    Pull,
}

impl RemoteOp {
    const fn direction(self) -> &'static str {
        match self {
            Self::Push => "push to",
            Self::Pull => "pull from",
        }
    }
}

impl std::fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push => write!(f, "Push"),
            Self::Pull => write!(f, "Pull"),
        }
    }
}

/// User-facing category of a push/pull authentication failure.
///
/// Derived from git's stderr by substring matching; best-effort only, since
/// git's messages are not a stable interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Required,
    Failed,
    PermissionDenied,
}

impl AuthFailure {
    /// Classify a git error message, if it looks like an auth problem.
    #[must_use]
    pub fn classify(message: &str) -> Option<Self> {
        if message.contains("could not read Username") || message.contains("could not read Password")
        {
            Some(Self::Required)
        } else if message.contains("Authentication failed") || message.contains("403") {
            Some(Self::Failed)
        } else if message.contains("Permission denied") {
            Some(Self::PermissionDenied)
        } else {
            None
        }
    }

    fn remediation(self, op: RemoteOp) -> String {
        match self {
            Self::Required => format!(
                "{op} failed: Git credentials not configured. For HTTPS URLs, you need to use \
                 a Personal Access Token (PAT). Consider using SSH URLs instead, or configure \
                 Git credentials."
            ),
            Self::Failed => format!(
                "{op} failed: Invalid credentials or insufficient permissions. Please check your \
                 access token or SSH keys."
            ),
            Self::PermissionDenied => format!(
                "{op} failed: You don't have permission to {} this repository. Check your \
                 repository access rights.",
                op.direction()
            ),
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "Authentication required"),
            Self::Failed => write!(f, "Authentication failed"),
            Self::PermissionDenied => write!(f, "Permission denied"),
        }
    }
}

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited non-zero; message is git's own output.
    #[error("{message}")]
    CommandFailed { command: String, message: String },

    /// Push or pull rejected for lack of (valid) credentials.
    #[error("{failure}")]
    Auth {
        op: RemoteOp,
        failure: AuthFailure,
        detail: String,
    },

    /// Push or pull failed for a reason other than authentication.
    #[error("{message}")]
    RemoteFailed { op: RemoteOp, message: String },

    /// Merge stopped with conflicts; the worktree is left conflicted.
    #[error("{message}")]
    MergeConflict { branch: String, message: String },

    /// Clone operation failed.
    #[error("{message}")]
    CloneFailed { url: String, message: String },

    /// Network command exceeded `git.network_timeout_secs`.
    #[error("git {command} timed out after {timeout_secs} seconds")]
    TimedOut { command: String, timeout_secs: u64 },

    /// Git executable could not be located.
    #[error("git executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Error from gix library.
    #[error("{0}")]
    Gix(#[from] GixError),
}

impl GitError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Auth { op, failure, .. } => Some(failure.remediation(*op)),
            Self::RemoteFailed { op, .. } => Some(format!(
                "Failed to {} changes. Check credentials and remote access.",
                op.to_string().to_lowercase()
            )),
            Self::MergeConflict { .. } => {
                Some("Merge conflict detected. Please resolve conflicts manually.".to_string())
            }
            Self::CloneFailed { .. } => Some("Failed to clone repository".to_string()),
            _ => None,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("File not found")]
    NotFound(String),

    #[error("Path is not a file")]
    NotAFile(String),

    #[error("File is not a text file")]
    NotText(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests;

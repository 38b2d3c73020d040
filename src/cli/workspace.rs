// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace operation arguments.
//!
//! # Subcommands
//!
//! ```text
//! clone SESSION URL [--branch B]         status SESSION
//! commit SESSION -m MSG --author-name N --author-email E [FILES...]
//! push|pull SESSION [--remote R] [--branch B]
//! branches SESSION                       branch SESSION NAME [--checkout]
//! checkout SESSION NAME                  merge SESSION BRANCH [-m MSG]
//! tree SESSION      read SESSION PATH    write SESSION PATH [--content C | stdin]
//! stash {save|list|apply|pop} SESSION ..
//! log SESSION [-n N] [--branch B]        diff SESSION [C1 [C2]] [--path P]
//! reset SESSION [--mode M] [--commit C]  tag {create|list} SESSION ..
//! user {set|get} SESSION ..              credentials SESSION -u USER (token: env)
//! workspaces
//! ```

use clap::{Args, Subcommand, ValueEnum};

use crate::git::ConfigScope;
use crate::service::DEFAULT_LOG_COUNT;

/// One operation on a session workspace.
#[derive(Debug, Clone, Subcommand)]
pub enum WorkspaceCommand {
    /// Clones a repository into the session workspace, replacing any previous one.
    Clone(CloneArgs),

    /// Shows branch, changed files and commit count.
    Status(SessionArgs),

    /// Stages files (all changes by default) and commits them.
    Commit(CommitArgs),

    /// Pushes a branch to a remote.
    Push(SyncArgs),

    /// Pulls a branch from a remote (merge, no rebase).
    Pull(SyncArgs),

    /// Lists local branches.
    Branches(SessionArgs),

    /// Creates a branch at HEAD.
    Branch(BranchArgs),

    /// Switches to a branch.
    Checkout(CheckoutArgs),

    /// Prints the workspace file tree.
    Tree(SessionArgs),

    /// Reads a text file from the workspace.
    Read(ReadArgs),

    /// Writes a file into the workspace, creating parent directories.
    Write(WriteArgs),

    /// Manages stashed changes.
    Stash(StashArgs),

    /// Shows commit history, newest first.
    Log(LogArgs),

    /// Shows a diff of the worktree or between commits.
    Diff(DiffArgs),

    /// Merges a branch into the current branch.
    Merge(MergeArgs),

    /// Resets the current branch.
    Reset(ResetArgs),

    /// Manages tags.
    Tag(TagArgs),

    /// Configures or shows the git user identity.
    User(UserArgs),

    /// Embeds GitHub credentials into the origin URL.
    Credentials(CredentialsArgs),

    /// Lists every workspace under the base directory.
    Workspaces,
}

/// Arguments for operations that only need a session.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Session identifier.
    pub session: String,
}

#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Session identifier.
    pub session: String,

    /// Repository URL.
    pub url: String,

    /// Branch to check out instead of the remote default.
    #[arg(short = 'b', long)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Session identifier.
    pub session: String,

    /// Commit message.
    #[arg(short = 'm', long, required = true)]
    pub message: String,

    /// Author name (also used as committer).
    #[arg(long = "author-name", required = true)]
    pub author_name: String,

    /// Author email (also used as committer).
    #[arg(long = "author-email", required = true)]
    pub author_email: String,

    /// Files to stage, relative to the workspace. All changes when omitted.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Session identifier.
    pub session: String,

    /// Remote name [default: origin].
    #[arg(short = 'r', long)]
    pub remote: Option<String>,

    /// Branch [default: current branch].
    #[arg(short = 'b', long)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    /// Session identifier.
    pub session: String,

    /// New branch name.
    pub name: String,

    /// Switch to the new branch.
    #[arg(long)]
    pub checkout: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Session identifier.
    pub session: String,

    /// Branch to switch to.
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct ReadArgs {
    /// Session identifier.
    pub session: String,

    /// File path relative to the workspace.
    pub path: String,
}

#[derive(Debug, Clone, Args)]
pub struct WriteArgs {
    /// Session identifier.
    pub session: String,

    /// File path relative to the workspace.
    pub path: String,

    /// File content. Read from stdin when omitted.
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct StashArgs {
    #[command(subcommand)]
    pub subcommand: StashSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum StashSubcommand {
    /// Stashes local changes.
    Save {
        /// Session identifier.
        session: String,

        /// Stash message.
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Include untracked files.
        #[arg(short = 'u', long = "include-untracked")]
        include_untracked: bool,
    },

    /// Lists stash entries.
    List(SessionArgs),

    /// Applies a stash entry and keeps it.
    Apply(StashIndexArgs),

    /// Applies a stash entry and drops it.
    Pop(StashIndexArgs),
}

#[derive(Debug, Clone, Args)]
pub struct StashIndexArgs {
    /// Session identifier.
    pub session: String,

    /// Stash index (stash@{N}).
    #[arg(default_value_t = 0)]
    pub index: usize,
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Session identifier.
    pub session: String,

    /// Maximum number of commits.
    #[arg(short = 'n', long = "max-count", default_value_t = DEFAULT_LOG_COUNT)]
    pub max_count: usize,

    /// Branch or ref [default: HEAD].
    #[arg(short = 'b', long)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct DiffArgs {
    /// Session identifier.
    pub session: String,

    /// First commit.
    pub commit1: Option<String>,

    /// Second commit.
    pub commit2: Option<String>,

    /// Restrict the diff to one file.
    #[arg(short = 'p', long)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Session identifier.
    pub session: String,

    /// Branch to merge.
    pub branch: String,

    /// Merge commit message.
    #[arg(short = 'm', long)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ResetArgs {
    /// Session identifier.
    pub session: String,

    /// Reset mode: soft, mixed or hard.
    #[arg(long, default_value = "mixed")]
    pub mode: String,

    /// Target commit [default: HEAD].
    #[arg(long)]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    pub subcommand: TagSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TagSubcommand {
    /// Creates a tag; annotated when a message is given.
    Create {
        /// Session identifier.
        session: String,

        /// Tag name.
        name: String,

        /// Annotation message.
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Commit to tag [default: HEAD].
        #[arg(long)]
        commit: Option<String>,
    },

    /// Lists tags.
    List(SessionArgs),
}

/// Where `user set` writes the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    #[default]
    Repository,
    Global,
}

impl From<ScopeArg> for ConfigScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Repository => Self::Repository,
            ScopeArg::Global => Self::Global,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub subcommand: UserSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserSubcommand {
    /// Sets user.name and user.email.
    Set {
        /// Session identifier.
        session: String,

        /// User name.
        #[arg(long, required = true)]
        name: String,

        /// User email.
        #[arg(long, required = true)]
        email: String,

        /// Config scope.
        #[arg(long, value_enum, default_value_t = ScopeArg::Repository)]
        scope: ScopeArg,
    },

    /// Shows the effective identity (global first, then repository).
    Get(SessionArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CredentialsArgs {
    /// Session identifier.
    pub session: String,

    /// GitHub username.
    #[arg(short = 'u', long, required = true)]
    pub username: String,

    /// GitHub personal access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, required = true)]
    pub token: String,
}

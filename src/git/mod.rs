// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          Public API
//!     query.rs      cmd.rs
//!        |            |
//!        v            v
//!   GitQuery       GitCli (runner.rs)
//!  (gix, read)    (CLI, async, write)
//!        |            |
//!        v            v
//!   GixBackend    git subprocess
//!   .is_repo      clone/commit/push/pull
//!   .branch       branch/stash/merge/reset
//!   .stashed      tag/config/remote
//!
//!   url/     redaction, GitHub credential URLs
//!   log/     `git log` record parser
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`GitCli`**: git CLI for everything that writes or touches the network.

pub mod backend;
pub mod cmd;
pub mod log;
pub mod query;
pub mod runner;
pub mod url;

pub use cmd::{ConfigScope, ResetMode};
pub use log::CommitInfo;
pub use runner::{GitCli, GitOutput};

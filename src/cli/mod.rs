// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for collab-git using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! collab-git [global options] <command>
//! version
//! options
//! <workspace operation>   (see workspace.rs)
//! ```

pub mod global;
pub mod workspace;


use crate::cli::global::GlobalOptions;
use crate::cli::workspace::WorkspaceCommand;
use clap::{Parser, Subcommand};

/// CodeCollab Workspace Git Manager
///
/// Session-isolated git working trees driven from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "collab-git",
    author,
    version,
    about = "CodeCollab Workspace Git Manager",
    long_about = "collab-git Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Manages one git working tree per collaboration session under a\n\
                  base directory. Every operation prints a JSON result with a\n\
                  `success` field and exits non-zero when it is false.",
    after_help = "CONFIG FILES:\n\n\
                  collab-git loads `collab-git.toml` from the current directory when\n\
                  present, then every file given with --config, then COLLAB_* environment\n\
                  variables (e.g. COLLAB_WORKSPACE__BASE_DIR), then --set and the other\n\
                  flags. Use --no-default-config to skip `collab-git.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values, and the config files used.
    Options,

    #[command(flatten)]
    Workspace(WorkspaceCommand),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

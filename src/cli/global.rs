// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       <- Additional config files (can repeat)
//! --log-level N       <- Console verbosity (0-5)
//! --file-log-level N  <- File verbosity (defaults to --log-level)
//! --log-file FILE     <- Also log to FILE
//! --base-dir DIR      <- workspace.base_dir override
//! --set KEY=VAL       <- Direct config override
//!
//! Precedence: CLI flags > --set > COLLAB_* env > --config > collab-git.toml > defaults
//! ```

use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files override earlier ones.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory holding one working tree per session.
    #[arg(short = 'b', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Sets an option, such as 'git.network_timeout_secs=120'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of collab-git.toml from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is not of the form `KEY=VALUE`.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = Vec::with_capacity(self.options.len() + 4);

        for option in &self.options {
            let Some((key, value)) = option.split_once('=') else {
                bail!("invalid --set option '{option}', expected KEY=VALUE");
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("invalid --set option '{option}', key is empty");
            }
            overrides.push((key.to_string(), value.trim().to_string()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level".to_string(), level.to_string()));
        }

        if let Some(level) = self.file_log_level {
            overrides.push(("global.file_log_level".to_string(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".to_string(), path.display().to_string()));
        }

        if let Some(ref dir) = self.base_dir {
            overrides.push(("workspace.base_dir".to_string(), dir.display().to_string()));
        }

        Ok(overrides)
    }
}

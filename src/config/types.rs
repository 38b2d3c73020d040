// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config
//!   global     log levels, log file
//!   workspace  base_dir (shared pool of session workspaces)
//!   git        executable, global_config, network_timeout_secs
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;

/// Directory name of the workspace pool under the system temp dir.
pub const DEFAULT_POOL_DIR: &str = "codecollab_repos";

/// Global options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// File log level, falls back to `log_level`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_log_level: Option<LogLevel>,
    /// Log file path; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

/// Workspace pool options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Root directory holding one working tree per session.
    pub base_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            base_dir: std::env::temp_dir().join(DEFAULT_POOL_DIR),
        }
    }
}

/// Git tool options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path, resolved through `PATH`.
    pub executable: PathBuf,
    /// File used as git's global config (`GIT_CONFIG_GLOBAL`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_config: Option<PathBuf>,
    /// Upper bound for clone/push/pull; unbounded when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_timeout_secs: Option<u64>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("git"),
            global_config: None,
            network_timeout_secs: None,
        }
    }
}

impl GitConfig {
    #[must_use]
    pub fn network_timeout(&self) -> Option<Duration> {
        self.network_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

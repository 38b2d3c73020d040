// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for collab-git.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. collab-git.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. COLLAB_* env vars
//! 5. CLI overrides (--base-dir, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! COLLAB_WORKSPACE__BASE_DIR=/srv/repos   → workspace.base_dir
//! COLLAB_GIT__NETWORK_TIMEOUT_SECS=120    → git.network_timeout_secs
//! COLLAB_GLOBAL__LOG_LEVEL=4              → global.log_level
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, WorkspaceConfig};

/// Local configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "collab-git.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "COLLAB";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Workspace pool.
    pub workspace: WorkspaceConfig,
    /// Git tool.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use collab_git::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("collab-git.toml")
    ///     .with_env_prefix("COLLAB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for a relative `workspace.base_dir`
    /// or an empty `git.executable`.
    pub fn validate(&self) -> Result<()> {
        if !self.workspace.base_dir.is_absolute() {
            return Err(ConfigError::InvalidValue {
                section: "workspace".to_string(),
                key: "base_dir".to_string(),
                message: format!(
                    "must be an absolute path, got '{}'",
                    self.workspace.base_dir.display()
                ),
            }
            .into());
        }
        if self.git.executable.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "executable".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let mut options = BTreeMap::new();
        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global
                .file_log_level
                .unwrap_or(self.global.log_level)
                .as_u8()
                .to_string(),
        );
        options.insert("global.log_file", fmt(&self.global.log_file));
        options.insert("global.json_log", self.global.json_log.to_string());
        options.insert(
            "workspace.base_dir",
            self.workspace.base_dir.display().to_string(),
        );
        options.insert("git.executable", self.git.executable.display().to_string());
        options.insert("git.global_config", fmt(&self.git.global_config));
        options.insert(
            "git.network_timeout_secs",
            self.git
                .network_timeout_secs
                .map_or_else(|| "unbounded".to_string(), |s| s.to_string()),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

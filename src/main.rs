// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | <workspace operation>
//!                              |
//!                        Ctrl-C aborts (exit 130, git children killed)
//! ```

use std::process::ExitCode;

use collab_git::cli::global::GlobalOptions;
use collab_git::cli::{self, Command};
use collab_git::cmd::config::run_options_command;
use collab_git::cmd::workspace::run_workspace_command;
use collab_git::config::loader::ConfigLoader;
use collab_git::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use collab_git::logging::{LogConfig, init_logging};
use tracing::warn;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Conventional exit status for SIGINT.
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    let (config, sources) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        code = dispatch_command(command, &config, &sources) => code,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
            ExitCode::from(INTERRUPTED)
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    let console_level = config.global.log_level;
    let file_level = config.global.file_log_level.unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .with_json_file(config.global.json_log)
        .build()
}

async fn dispatch_command(command: &Command, config: &Config, sources: &[String]) -> ExitCode {
    let result = match command {
        Command::Version => {
            handle_version_command();
            Ok(true)
        }
        Command::Options => {
            run_options_command(config, sources);
            Ok(true)
        }
        Command::Workspace(op) => run_workspace_command(op, config).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> collab_git::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides()? {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> collab_git::error::Result<(Config, Vec<String>)> {
    let loader = build_config_loader(global)?;
    let sources = loader.format_loaded_sources();
    Ok((loader.build()?, sources))
}

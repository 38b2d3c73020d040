// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for collab-git.

use crate::config::Config;

/// Display current configuration options followed by the files they came from.
pub fn run_options_command(config: &Config, loaded_sources: &[String]) {
    for line in config.format_options() {
        println!("{line}");
    }

    println!();
    if loaded_sources.is_empty() {
        println!("No configuration files loaded");
    } else {
        println!("Configuration sources:");
        for line in loaded_sources {
            println!("  {line}");
        }
    }
}

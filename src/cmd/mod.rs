// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options), workspace (every git operation)
//! ```

pub mod config;
pub mod workspace;

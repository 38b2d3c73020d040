// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                 JSON envelopes
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          service          |
//!              |  GitService: one method   |
//!              |  per workspace operation  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!            workspace       git     config
//!          ids, paths,   gix reads,  TOML,
//!          safe_resolve  CLI writes  layered
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod service;
pub mod workspace;

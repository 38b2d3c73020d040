// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace layout and input validation.
//!
//! ```text
//! validate.rs   session ids, relative paths, containment, git arguments
//! resolver.rs   Workspaces { base_dir }: session id -> directory
//! envelope.rs   Envelope<T>: uniform success / failure result
//! ```

pub mod envelope;
pub mod resolver;
pub mod validate;

pub use envelope::{Envelope, Failure};
pub use resolver::Workspaces;
pub use validate::{safe_resolve, validate_file_path, validate_session_id};

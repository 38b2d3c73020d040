// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path and argument validation.
//!
//! ```text
//! session id   ^[A-Za-z0-9_-]+$, <= 128, no "..", "/", "\"
//! file path    <= 1024, no NUL, normalized form stays relative
//!                 |
//!                 v
//! safe_resolve base.join(path), symlinks followed one component at a
//!              time, result must equal base or sit beneath it
//! ```
//!
//! The pattern check and the resolve-then-contain check are independent
//! layers; callers apply both before touching the filesystem.

use regex::Regex;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{ValidationError, WsResult};

/// Longest accepted session identifier.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Longest accepted relative file path.
pub const MAX_FILE_PATH_LEN: usize = 1024;

/// Same bound the kernel applies to symlink chains.
const MAX_SYMLINK_HOPS: usize = 40;

static SESSION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("session id pattern is valid")
});

/// Check a session identifier before it is used as a directory name.
#[must_use]
pub fn validate_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id.len() <= MAX_SESSION_ID_LEN
        && SESSION_ID.is_match(session_id)
        && !session_id.contains("..")
        && !session_id.contains('/')
        && !session_id.contains('\\')
}

/// Check a caller-supplied path relative to a workspace root.
///
/// Lexical only; pair with [`safe_resolve`] to account for symlinks.
#[must_use]
pub fn validate_file_path(file_path: &str) -> bool {
    if file_path.is_empty() || file_path.len() > MAX_FILE_PATH_LEN || file_path.contains('\0') {
        return false;
    }
    let normalized = normalize(file_path);
    !(normalized.starts_with("..")
        || normalized.starts_with('/')
        || normalized.starts_with('\\')
        || normalized.as_bytes().get(1) == Some(&b':'))
}

/// Collapse `.`, `..` and repeated separators without touching the disk.
///
/// Leading `..` segments of a relative path are kept, so an escaping path
/// stays visibly escaping. Empty input normalizes to `.`.
pub(crate) fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn push_components(pending: &mut Vec<PathBuf>, path: &Path) {
    let parts: Vec<PathBuf> = path
        .components()
        .map(|c| PathBuf::from(c.as_os_str()))
        .collect();
    pending.extend(parts.into_iter().rev());
}

/// Resolve `relative` under `base_dir`, following symlinks, and return the
/// absolute result only if it is `base_dir` itself or lies beneath it.
///
/// Components that do not exist yet are appended lexically, so the target
/// of a future write resolves too. Returns `None` on containment violation
/// or any resolution error.
#[must_use]
pub fn safe_resolve(base_dir: &Path, relative: impl AsRef<Path>) -> Option<PathBuf> {
    let base = std::fs::canonicalize(base_dir).ok()?;
    let mut resolved = base.clone();
    let mut pending = Vec::new();
    push_components(&mut pending, relative.as_ref());
    let mut hops = 0;

    while let Some(part) = pending.pop() {
        match part.components().next() {
            Some(Component::Prefix(_)) => resolved = part,
            Some(Component::RootDir) => resolved.push(part),
            Some(Component::CurDir) | None => {}
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::Normal(name)) => {
                let candidate = resolved.join(name);
                match std::fs::symlink_metadata(&candidate) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        hops += 1;
                        if hops > MAX_SYMLINK_HOPS {
                            return None;
                        }
                        let target = std::fs::read_link(&candidate).ok()?;
                        push_components(&mut pending, &target);
                    }
                    Ok(_) => resolved = candidate,
                    Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                        resolved = candidate;
                    }
                    Err(_) => return None,
                }
            }
        }
    }

    (resolved == base || resolved.starts_with(&base)).then_some(resolved)
}

/// Whether any component of `path` is `.git`, compared ASCII
/// case-insensitively as git itself does when checking worktree paths.
#[must_use]
pub fn is_git_metadata_path(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(".git"))
    })
}

/// Resolve a worktree file for reading or writing.
///
/// Applies [`safe_resolve`] and refuses anything inside a `.git` directory,
/// whether named directly or reached through a symlink.
///
/// # Errors
///
/// `ValidationError::GitMetadata` or `ValidationError::OutsideWorkspace`.
pub fn resolve_worktree_file(base_dir: &Path, relative: &str) -> WsResult<PathBuf> {
    if is_git_metadata_path(Path::new(relative)) {
        return Err(ValidationError::GitMetadata.into());
    }
    let resolved = safe_resolve(base_dir, relative).ok_or(ValidationError::OutsideWorkspace)?;
    let base = std::fs::canonicalize(base_dir).map_err(|_| ValidationError::OutsideWorkspace)?;
    match resolved.strip_prefix(&base) {
        Ok(inner) if !is_git_metadata_path(inner) => Ok(resolved),
        Ok(_) => Err(ValidationError::GitMetadata.into()),
        Err(_) => Err(ValidationError::OutsideWorkspace.into()),
    }
}

/// Reject a ref, branch, tag, remote name or URL that git could parse as an
/// option or that smuggles control characters.
///
/// # Errors
///
/// Returns `ValidationError::InvalidArgument` naming `what`.
pub fn check_argument(what: &'static str, value: &str) -> WsResult<()> {
    if value.is_empty() || value.starts_with('-') || value.chars().any(char::is_control) {
        return Err(ValidationError::InvalidArgument {
            what,
            value: value.escape_debug().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Like [`check_argument`] for optional values.
///
/// # Errors
///
/// Returns `ValidationError::InvalidArgument` naming `what`.
pub fn check_optional(what: &'static str, value: Option<&str>) -> WsResult<()> {
    value.map_or(Ok(()), |v| check_argument(what, v))
}

/// Like [`check_argument`] for a branch handed to push or pull, which git
/// would also read as a refspec (`src:dst`, `+force`).
///
/// # Errors
///
/// Returns `ValidationError::InvalidArgument` naming `what`.
pub fn check_branch(what: &'static str, value: &str) -> WsResult<()> {
    check_argument(what, value)?;
    if value.starts_with('+') || value.contains(':') {
        return Err(ValidationError::InvalidArgument {
            what,
            value: value.escape_debug().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reject author identities git would misparse in `Name <email>` form.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAuthor`.
pub fn check_author(name: &str, email: &str) -> WsResult<()> {
    let bad = |s: &str| s.trim().is_empty() || s.chars().any(|c| c == '<' || c == '>' || c.is_control());
    if bad(name) || bad(email) {
        return Err(ValidationError::InvalidAuthor(
            format!("{name} <{email}>").escape_debug().to_string(),
        )
        .into());
    }
    Ok(())
}

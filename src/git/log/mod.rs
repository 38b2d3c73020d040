// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git log` record format and parser.
//!
//! ```text
//! %H US %an US %ae US %cI US %P US %B RS
//! (US = 0x1f unit separator, RS = 0x1e record separator)
//! ```

use serde::Serialize;

/// `--format` string understood by [`parse_log`].
pub const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%ae%x1f%cI%x1f%P%x1f%B%x1e";

const SHORT_HASH_LEN: usize = 7;

/// One commit of a history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub short_hash: String,
    pub author: String,
    pub email: String,
    pub message: String,
    /// Committer date, strict ISO 8601.
    pub date: String,
    pub parent_count: usize,
}

/// Parse `git log` output produced with [`LOG_FORMAT`], preserving order.
#[must_use]
pub fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .split('\x1e')
        .map(|record| record.trim_start_matches('\n'))
        .filter(|record| !record.trim().is_empty())
        .filter_map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Option<CommitInfo> {
    let mut fields = record.splitn(6, '\x1f');
    let hash = fields.next()?.trim().to_string();
    let author = fields.next()?.to_string();
    let email = fields.next()?.to_string();
    let date = fields.next()?.to_string();
    let parents = fields.next()?;
    let message = fields.next().unwrap_or_default().trim().to_string();

    Some(CommitInfo {
        short_hash: hash.chars().take(SHORT_HASH_LEN).collect(),
        hash,
        author,
        email,
        message,
        date,
        parent_count: parents.split_whitespace().count(),
    })
}

#[cfg(test)]
mod tests;

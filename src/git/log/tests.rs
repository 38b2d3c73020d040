// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::parse_log;

#[test]
fn test_parse_log_records() {
    let output = concat!(
        "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\x1fAda\x1fada@example.com\x1f2026-01-02T03:04:05+00:00\x1fbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb cccccccccccccccccccccccccccccccccccccccc\x1fMerge feature\n\nBody line\n\x1e\n",
        "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\x1fBob\x1fbob@example.com\x1f2026-01-01T00:00:00+00:00\x1f\x1fInitial commit\n\x1e\n",
    );

    let commits = parse_log(output);
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].short_hash, "aaaaaaa");
    assert_eq!(commits[0].message, "Merge feature\n\nBody line");
    assert_eq!(commits[0].parent_count, 2);
    assert_eq!(commits[1].author, "Bob");
    assert_eq!(commits[1].parent_count, 0);
    assert_eq!(commits[1].date, "2026-01-01T00:00:00+00:00");
}

#[test]
fn test_parse_log_empty() {
    assert!(parse_log("").is_empty());
    assert!(parse_log("\n").is_empty());
}

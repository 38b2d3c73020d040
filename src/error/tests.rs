// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    AuthFailure, ErrorKind, GitError, PreconditionError, RemoteOp, ValidationError,
    WorkspaceError, WsResult,
};

#[test]
fn test_workspace_error_size() {
    // Every variant is a Box, so discriminant + pointer
    let size = std::mem::size_of::<WorkspaceError>();
    assert!(size <= 24, "WorkspaceError is {size} bytes, expected <= 24");
}

#[test]
fn test_ws_result_size() {
    let size = std::mem::size_of::<WsResult<()>>();
    assert!(size <= 24, "WsResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_leaf_messages_pass_through_top_level() {
    let err = WorkspaceError::from(ValidationError::InvalidCommitPath(
        "../etc/passwd".to_string(),
    ));
    insta::assert_snapshot!(err.to_string(), @"Invalid file path: ../etc/passwd");

    let err = WorkspaceError::from(PreconditionError::NoRepository);
    insta::assert_snapshot!(err.to_string(), @"No repository found for this session");

    let err = WorkspaceError::from(ValidationError::InvalidResetMode("nonsense".into()));
    insta::assert_snapshot!(err.to_string(), @"Invalid reset mode. Use 'soft', 'mixed', or 'hard'");
}

#[test]
fn test_error_kinds() {
    let kinds = [
        WorkspaceError::from(ValidationError::InvalidSessionId).kind(),
        WorkspaceError::from(PreconditionError::NoRemote).kind(),
        WorkspaceError::from(GitError::CommandFailed {
            command: "git status".into(),
            message: "fatal".into(),
        })
        .kind(),
        WorkspaceError::from(std::io::Error::other("disk")).kind(),
    ];
    assert_eq!(
        kinds,
        [
            ErrorKind::Validation,
            ErrorKind::Precondition,
            ErrorKind::Tool,
            ErrorKind::Io
        ]
    );
}

#[test]
fn test_auth_classification() {
    let cases = [
        (
            "fatal: could not read Username for 'https://github.com': terminal prompts disabled",
            Some(AuthFailure::Required),
        ),
        (
            "remote: Invalid username or password.\nfatal: Authentication failed for 'https://github.com/o/r.git/'",
            Some(AuthFailure::Failed),
        ),
        (
            "fatal: unable to access 'https://github.com/o/r.git/': The requested URL returned error: 403",
            Some(AuthFailure::Failed),
        ),
        (
            "git@github.com: Permission denied (publickey).",
            Some(AuthFailure::PermissionDenied),
        ),
        ("fatal: 'origin' does not appear to be a git repository", None),
    ];

    for (message, expected) in cases {
        assert_eq!(AuthFailure::classify(message), expected, "{message}");
    }
}

#[test]
fn test_auth_error_carries_remediation() {
    let err = WorkspaceError::from(GitError::Auth {
        op: RemoteOp::Push,
        failure: AuthFailure::Required,
        detail: "could not read Username".into(),
    });
    assert_eq!(err.to_string(), "Authentication required");
    let hint = err.hint().expect("auth errors carry a hint");
    assert!(hint.starts_with("Push failed: Git credentials not configured"));
}

#[test]
fn test_merge_conflict_hint() {
    let err = WorkspaceError::from(GitError::MergeConflict {
        branch: "feature".into(),
        message: "CONFLICT (content): Merge conflict in a.txt".into(),
    });
    insta::assert_snapshot!(
        err.hint().unwrap_or_default(),
        @"Merge conflict detected. Please resolve conflicts manually."
    );
}

#[test]
fn test_permission_denied_hint_names_direction() {
    let err = WorkspaceError::from(GitError::Auth {
        op: RemoteOp::Pull,
        failure: AuthFailure::PermissionDenied,
        detail: "Permission denied (publickey)".into(),
    });
    insta::assert_snapshot!(
        err.hint().unwrap_or_default(),
        @"Pull failed: You don't have permission to pull from this repository. Check your repository access rights."
    );
}

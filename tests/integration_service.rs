// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for local workspace operations.
//!
//! Each test builds its own base directory with real repositories and drives
//! `GitService` end to end.

use collab_git::config::Config;
use collab_git::error::{ErrorKind, WorkspaceError};
use collab_git::git::ConfigScope;
use collab_git::service::{GitService, TreeNode};
use collab_git::workspace::Envelope;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SESSION: &str = "session-1";

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn service(temp: &TempDir) -> GitService {
    let mut config = Config::default();
    config.workspace.base_dir = temp.path().join("repos");
    config.git.global_config = Some(temp.path().join("gitconfig"));
    GitService::new(&config).expect("git must be installed")
}

/// Run git inside `cwd` with an isolated global config and a fixed identity.
fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Workspace for [`SESSION`] on `main` with one commit of `README.md`.
fn seed_workspace(temp: &TempDir) -> PathBuf {
    let repo = temp.path().join("repos").join(SESSION);
    std::fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "--quiet", "--initial-branch=main"]);
    std::fs::write(repo.join("README.md"), "hello\n").unwrap();
    git(&repo, &["add", "README.md"]);
    git(&repo, &["commit", "--quiet", "-m", "Initial commit"]);
    repo
}

async fn configure_test_user(service: &GitService) {
    service
        .configure_user(SESSION, "Ada", "ada@example.com", ConfigScope::Global)
        .await
        .unwrap();
}

fn kind(err: &WorkspaceError) -> ErrorKind {
    err.kind()
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn status_reports_each_change_category() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);

    std::fs::write(repo.join("README.md"), "changed\n").unwrap();
    std::fs::write(repo.join("staged.txt"), "s").unwrap();
    git(&repo, &["add", "staged.txt"]);
    std::fs::write(repo.join("new.txt"), "n").unwrap();

    let status = service.status(SESSION).await.unwrap();
    assert_eq!(status.branch.as_deref(), Some("main"));
    assert_eq!(status.modified, ["README.md"]);
    assert_eq!(status.staged, ["staged.txt"]);
    assert_eq!(status.untracked, ["new.txt"]);
    assert!(status.is_dirty);
    assert_eq!(status.commit_count, 1);
}

#[tokio::test]
async fn status_is_idempotent() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("new.txt"), "n").unwrap();

    let first = serde_json::to_value(service.status(SESSION).await.unwrap()).unwrap();
    let second = serde_json::to_value(service.status(SESSION).await.unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(git(&repo, &["status", "--porcelain"]), "?? new.txt");
}

#[tokio::test]
async fn status_without_workspace_is_precondition_failure() {
    let temp = temp_dir();
    let service = service(&temp);

    let err = service.status("nobody-here").await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Precondition);
    insta::assert_snapshot!(err, @"No repository found for this session");
}

// =============================================================================
// Commit
// =============================================================================

#[tokio::test]
async fn commit_stages_all_changes_by_default() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("a.txt"), "a").unwrap();
    std::fs::write(repo.join("b.txt"), "b").unwrap();

    let committed = service
        .commit(SESSION, "Add files", "Ada", "ada@example.com", None)
        .await
        .unwrap();
    assert_eq!(committed.commit_hash.len(), 40);
    assert_eq!(committed.author, "Ada <ada@example.com>");
    assert_eq!(git(&repo, &["rev-parse", "HEAD"]), committed.commit_hash);
    assert_eq!(
        git(&repo, &["log", "-1", "--format=%an <%ae>|%cn"]),
        "Ada <ada@example.com>|Ada"
    );
    assert_eq!(git(&repo, &["status", "--porcelain"]), "");
}

#[tokio::test]
async fn commit_stages_only_listed_files() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("a.txt"), "a").unwrap();
    std::fs::write(repo.join("b.txt"), "b").unwrap();

    service
        .commit(SESSION, "Add a", "Ada", "ada@example.com", Some(&["a.txt".to_string()]))
        .await
        .unwrap();
    assert_eq!(git(&repo, &["show", "--name-only", "--format=", "HEAD"]), "a.txt");
    assert_eq!(git(&repo, &["status", "--porcelain"]), "?? b.txt");
}

#[tokio::test]
async fn commit_rejects_escaping_path_before_staging() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("a.txt"), "a").unwrap();

    let files = ["a.txt".to_string(), "../etc/passwd".to_string()];
    let err = service
        .commit(SESSION, "Sneaky", "Ada", "ada@example.com", Some(&files))
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
    insta::assert_snapshot!(err, @"Invalid file path: ../etc/passwd");
    assert_eq!(git(&repo, &["diff", "--cached", "--name-only"]), "");
    assert_eq!(git(&repo, &["rev-list", "--count", "HEAD"]), "1");
}

#[tokio::test]
async fn commit_with_nothing_to_commit_is_tool_failure() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let err = service
        .commit(SESSION, "Empty", "Ada", "ada@example.com", None)
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Tool);
    assert!(err.to_string().contains("nothing to commit"), "unexpected: {err}");
}

#[tokio::test]
async fn commit_rejects_malformed_author() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let err = service
        .commit(SESSION, "msg", "Ada <evil>", "ada@example.com", None)
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
}

// =============================================================================
// Branches and merge
// =============================================================================

#[tokio::test]
async fn create_and_checkout_branches() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let created = service.create_branch(SESSION, "feature", false).await.unwrap();
    assert!(!created.checked_out);
    let branches = service.list_branches(SESSION).await.unwrap();
    assert_eq!(branches.branches, ["feature", "main"]);
    assert_eq!(branches.current_branch.as_deref(), Some("main"));

    service.create_branch(SESSION, "topic", true).await.unwrap();
    assert_eq!(
        service.list_branches(SESSION).await.unwrap().current_branch.as_deref(),
        Some("topic")
    );

    let switched = service.checkout_branch(SESSION, "feature").await.unwrap();
    insta::assert_snapshot!(switched.message, @"Switched to branch 'feature'");

    let err = service.checkout_branch(SESSION, "missing").await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Tool);
}

#[tokio::test]
async fn option_like_branch_name_is_rejected() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let err = service
        .create_branch(SESSION, "--orphan", false)
        .await
        .unwrap_err();
    insta::assert_snapshot!(err, @"Invalid branch: --orphan");
    assert_eq!(service.list_branches(SESSION).await.unwrap().branches, ["main"]);
}

#[tokio::test]
async fn merge_fast_forward() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    configure_test_user(&service).await;

    service.create_branch(SESSION, "feature", true).await.unwrap();
    std::fs::write(repo.join("f.txt"), "f").unwrap();
    service
        .commit(SESSION, "Feature", "Ada", "ada@example.com", None)
        .await
        .unwrap();
    service.checkout_branch(SESSION, "main").await.unwrap();

    let merged = service.merge(SESSION, "feature", None).await.unwrap();
    assert_eq!(merged.current_branch.as_deref(), Some("main"));
    assert_eq!(merged.merged_branch, "feature");
    assert!(repo.join("f.txt").exists());
}

#[tokio::test]
async fn merge_conflict_leaves_workspace_conflicted() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    configure_test_user(&service).await;

    service.create_branch(SESSION, "feature", true).await.unwrap();
    std::fs::write(repo.join("README.md"), "feature\n").unwrap();
    service
        .commit(SESSION, "Feature edit", "Ada", "ada@example.com", None)
        .await
        .unwrap();
    service.checkout_branch(SESSION, "main").await.unwrap();
    std::fs::write(repo.join("README.md"), "main\n").unwrap();
    service
        .commit(SESSION, "Main edit", "Ada", "ada@example.com", None)
        .await
        .unwrap();

    let result = service.merge(SESSION, "feature", None).await;
    let err = result.as_ref().unwrap_err();
    assert_eq!(kind(err), ErrorKind::Tool);
    insta::assert_snapshot!(
        err.hint().unwrap(),
        @"Merge conflict detected. Please resolve conflicts manually."
    );
    assert!(repo.join(".git/MERGE_HEAD").exists());
    assert!(git(&repo, &["status", "--porcelain"]).contains("UU README.md"));

    let json = serde_json::to_value(Envelope::from(result)).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["kind"], "tool");
}

// =============================================================================
// Stash
// =============================================================================

#[tokio::test]
async fn stash_save_list_pop() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    configure_test_user(&service).await;

    std::fs::write(repo.join("README.md"), "wip\n").unwrap();
    std::fs::write(repo.join("scratch.txt"), "s").unwrap();
    service.stash(SESSION, Some("work in progress"), true).await.unwrap();
    assert_eq!(git(&repo, &["status", "--porcelain"]), "");

    let stashes = service.list_stashes(SESSION).await.unwrap().stashes;
    assert_eq!(stashes.len(), 1);
    assert!(stashes[0].contains("work in progress"), "unexpected: {stashes:?}");

    let popped = service.pop_stash(SESSION, 0).await.unwrap();
    insta::assert_snapshot!(popped.message, @"Stash 0 popped successfully");
    assert!(repo.join("scratch.txt").exists());
    assert!(service.list_stashes(SESSION).await.unwrap().stashes.is_empty());
}

#[tokio::test]
async fn stash_apply_keeps_entry() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    configure_test_user(&service).await;

    std::fs::write(repo.join("README.md"), "wip\n").unwrap();
    service.stash(SESSION, None, false).await.unwrap();
    service.apply_stash(SESSION, 0).await.unwrap();
    assert_eq!(std::fs::read_to_string(repo.join("README.md")).unwrap(), "wip\n");
    assert_eq!(service.list_stashes(SESSION).await.unwrap().stashes.len(), 1);

    let err = service.apply_stash(SESSION, 5).await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Tool);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn log_tags_and_reset() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    configure_test_user(&service).await;

    std::fs::write(repo.join("a.txt"), "a").unwrap();
    let second = service
        .commit(SESSION, "Second\n\nWith body", "Ada", "ada@example.com", None)
        .await
        .unwrap();

    let log = service.commit_log(SESSION, 10, None).await.unwrap();
    assert_eq!(log.count, 2);
    assert_eq!(log.commits[0].hash, second.commit_hash);
    assert_eq!(log.commits[0].message, "Second\n\nWith body");
    assert_eq!(log.commits[1].message, "Initial commit");
    assert_eq!(service.commit_log(SESSION, 1, None).await.unwrap().count, 1);

    let tag = service
        .create_tag(SESSION, "v1.0", Some("Release 1.0"), None)
        .await
        .unwrap();
    insta::assert_snapshot!(tag.message, @"Tag 'v1.0' created successfully");
    service.create_tag(SESSION, "light", None, Some("HEAD~1")).await.unwrap();
    let tags = service.list_tags(SESSION).await.unwrap();
    assert_eq!(tags.tags, ["light", "v1.0"]);
    assert_eq!(git(&repo, &["cat-file", "-t", "v1.0"]), "tag");

    let reset = service.reset(SESSION, "soft", Some("HEAD~1")).await.unwrap();
    insta::assert_snapshot!(reset.message, @"Reset to HEAD~1 (soft mode)");
    assert_eq!(git(&repo, &["rev-list", "--count", "HEAD"]), "1");
    assert_eq!(git(&repo, &["diff", "--cached", "--name-only"]), "a.txt");

    service.reset(SESSION, "hard", None).await.unwrap();
    assert!(!repo.join("a.txt").exists());
}

#[tokio::test]
async fn reset_rejects_unknown_mode_without_touching_repo() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("README.md"), "dirty\n").unwrap();

    let err = service.reset(SESSION, "keep", None).await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
    assert_eq!(git(&repo, &["status", "--porcelain"]), "M README.md");
}

#[tokio::test]
async fn diff_worktree_and_file_filter() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("README.md"), "hello\nworld\n").unwrap();

    let diff = service.diff(SESSION, None, None, None).await.unwrap().diff;
    assert!(diff.contains("+world"), "unexpected diff: {diff}");

    let other = service
        .diff(SESSION, None, None, Some("other.txt"))
        .await
        .unwrap()
        .diff;
    assert!(other.is_empty());

    let err = service
        .diff(SESSION, None, None, Some("../outside"))
        .await
        .unwrap_err();
    insta::assert_snapshot!(err, @"Invalid file path");
}

// =============================================================================
// Files
// =============================================================================

#[tokio::test]
async fn write_then_read_round_trip() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let written = service
        .write_file(SESSION, "src/nested/lib.rs", "fn main() {}\n")
        .await
        .unwrap();
    assert_eq!(written.path, "src/nested/lib.rs");

    let read = service.read_file(SESSION, "src/nested/lib.rs").await.unwrap();
    assert_eq!(read.content, "fn main() {}\n");

    let tree = service.file_tree(SESSION).await.unwrap().tree;
    let names: Vec<_> = tree.iter().map(TreeNode::name).collect();
    assert_eq!(names, ["README.md", "src"]);
}

#[tokio::test]
async fn read_errors_are_classified() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::create_dir(repo.join("dir")).unwrap();
    std::fs::write(repo.join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let missing = service.read_file(SESSION, "missing.txt").await.unwrap_err();
    insta::assert_snapshot!(missing, @"File not found");
    let dir = service.read_file(SESSION, "dir").await.unwrap_err();
    insta::assert_snapshot!(dir, @"Path is not a file");
    let binary = service.read_file(SESSION, "blob.bin").await.unwrap_err();
    insta::assert_snapshot!(binary, @"File is not a text file");
    let escape = service.read_file(SESSION, "../secret").await.unwrap_err();
    assert_eq!(kind(&escape), ErrorKind::Validation);
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_escape_is_denied() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(temp.path().join("secret.txt"), "top secret").unwrap();
    std::os::unix::fs::symlink(temp.path(), repo.join("link")).unwrap();

    let err = service.read_file(SESSION, "link/secret.txt").await.unwrap_err();
    insta::assert_snapshot!(err, @"Access denied: file outside repository");
    let err = service
        .write_file(SESSION, "link/planted.txt", "x")
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
    assert!(!temp.path().join("planted.txt").exists());
}

#[tokio::test]
async fn repository_metadata_is_not_readable_or_writable() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    let before = std::fs::read_to_string(repo.join(".git/config")).unwrap();

    let err = service.read_file(SESSION, ".git/config").await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
    insta::assert_snapshot!(err, @"Access denied: repository metadata is not accessible");

    for path in [".git/config", ".GIT/config", "sub/.git/config", ".git/hooks/pre-commit"] {
        let err = service
            .write_file(SESSION, path, "[core]\n\tfsmonitor = touch pwned\n")
            .await
            .unwrap_err();
        assert_eq!(kind(&err), ErrorKind::Validation, "{path}");
    }
    assert_eq!(std::fs::read_to_string(repo.join(".git/config")).unwrap(), before);
    assert!(!repo.join(".git/hooks/pre-commit").exists());
    assert!(!repo.join("sub").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_into_repository_metadata_is_denied() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::os::unix::fs::symlink(repo.join(".git"), repo.join("meta")).unwrap();

    let err = service.read_file(SESSION, "meta/config").await.unwrap_err();
    insta::assert_snapshot!(err, @"Access denied: repository metadata is not accessible");
    let err = service
        .write_file(SESSION, "meta/hooks/post-checkout", "#!/bin/sh\n")
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Validation);
    assert!(!repo.join(".git/hooks/post-checkout").exists());
}

#[tokio::test]
async fn commit_refuses_repository_metadata_paths() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("a.txt"), "a").unwrap();

    let files = ["a.txt".to_string(), ".git/config".to_string()];
    let err = service
        .commit(SESSION, "Meta", "Ada", "ada@example.com", Some(&files))
        .await
        .unwrap_err();
    insta::assert_snapshot!(err, @"Invalid file path: .git/config");
    assert_eq!(git(&repo, &["diff", "--cached", "--name-only"]), "");
}

#[tokio::test]
async fn commit_file_list_is_taken_literally() {
    let temp = temp_dir();
    let repo = seed_workspace(&temp);
    let service = service(&temp);
    std::fs::write(repo.join("a.txt"), "a").unwrap();
    std::fs::write(repo.join("secret.env"), "TOKEN=hunter2").unwrap();

    let err = service
        .commit(SESSION, "Glob", "Ada", "ada@example.com", Some(&["*".to_string()]))
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Tool);
    assert_eq!(git(&repo, &["ls-files"]), "README.md");
    assert_eq!(git(&repo, &["rev-list", "--count", "HEAD"]), "1");

    std::fs::write(repo.join("README.md"), "changed\n").unwrap();
    let diff = service
        .diff(SESSION, None, None, Some("*.md"))
        .await
        .unwrap()
        .diff;
    assert!(diff.is_empty(), "glob matched: {diff}");
}

// =============================================================================
// User configuration
// =============================================================================

#[tokio::test]
async fn user_config_prefers_global_then_repository() {
    let temp = temp_dir();
    seed_workspace(&temp);
    let service = service(&temp);

    let err = service.get_user_config(SESSION).await.unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Precondition);
    assert!(err.hint().is_none());

    service
        .configure_user(SESSION, "Local", "local@example.com", ConfigScope::Repository)
        .await
        .unwrap();
    let identity = service.get_user_config(SESSION).await.unwrap();
    assert_eq!(identity.name, "Local");
    assert_eq!(identity.scope, ConfigScope::Repository);

    configure_test_user(&service).await;
    let identity = service.get_user_config(SESSION).await.unwrap();
    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.scope, ConfigScope::Global);
}

#[tokio::test]
async fn user_config_without_workspace_hints_global_setup() {
    let temp = temp_dir();
    let service = service(&temp);

    let err = service.get_user_config("fresh").await.unwrap_err();
    insta::assert_snapshot!(
        err.hint().unwrap(),
        @"No global Git config found. Please configure your Git user."
    );

    let err = service
        .configure_user("fresh", "Ada", "ada@example.com", ConfigScope::Repository)
        .await
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::Precondition);
}

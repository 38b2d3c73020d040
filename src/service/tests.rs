// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::files::build_tree;
use super::{GitService, TreeNode};
use crate::config::Config;
use crate::error::{ErrorKind, PreconditionError, ValidationError, WorkspaceError};
use crate::workspace::Envelope;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn service(temp: &TempDir) -> GitService {
    let mut config = Config::default();
    config.workspace.base_dir = temp.path().join("repos");
    config.git.global_config = Some(temp.path().join("gitconfig"));
    GitService::new(&config).expect("git must be installed")
}

fn init_repo(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
    gix::init(path).expect("failed to init repo");
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_build_tree_nests_and_sorts() {
    let temp = temp_dir();
    let root = temp.path();
    write(root, "b.txt", "bb");
    write(root, "a/z.txt", "z");
    write(root, "a/inner/deep.txt", "deep");
    write(root, ".git/HEAD", "ref: refs/heads/main");
    write(root, ".gitignore", "a/\n");
    std::fs::create_dir(root.join("empty")).unwrap();

    let tree = build_tree(root);
    let names: Vec<_> = tree.iter().map(TreeNode::name).collect();
    assert_eq!(names, [".gitignore", "a", "b.txt", "empty"]);

    let TreeNode::Directory { children, path, .. } = &tree[1] else {
        panic!("expected directory, got {:?}", tree[1]);
    };
    assert_eq!(path, "a");
    assert_eq!(children.len(), 2);
    assert!(matches!(&children[0], TreeNode::Directory { name, children, .. }
        if name == "inner" && children.len() == 1));
    assert_eq!(
        children[1],
        TreeNode::File {
            name: "z.txt".into(),
            path: Path::new("a").join("z.txt").to_string_lossy().into_owned(),
            size: 1,
        }
    );
    assert!(matches!(&tree[3], TreeNode::Directory { children, .. } if children.is_empty()));
}

#[cfg(unix)]
#[test]
fn test_build_tree_keeps_going_past_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let root = temp.path();
    write(root, "a.txt", "a");
    write(root, "locked/hidden.txt", "h");
    write(root, "z/inner.txt", "z");
    let locked = root.join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    let tree = build_tree(root);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let names: Vec<_> = tree.iter().map(TreeNode::name).collect();
    assert_eq!(names, ["a.txt", "locked", "z"]);
    // Root ignores the mode bits, so only the shape is checked here.
    assert!(matches!(&tree[1], TreeNode::Directory { children, .. } if children.len() <= 1));
    assert!(matches!(&tree[2], TreeNode::Directory { children, .. } if children.len() == 1));
}

#[test]
fn test_tree_node_serializes_with_type_tag() {
    let node = TreeNode::File {
        name: "a.txt".into(),
        path: "a.txt".into(),
        size: 3,
    };
    insta::assert_snapshot!(
        serde_json::to_string(&node).unwrap(),
        @r#"{"type":"file","name":"a.txt","path":"a.txt","size":3}"#
    );
}

#[test]
fn test_new_creates_base_dir() {
    let temp = temp_dir();
    let svc = service(&temp);
    assert!(svc.workspaces().base_dir().is_dir());
}

#[tokio::test]
async fn test_invalid_session_rejected_before_git() {
    let temp = temp_dir();
    let svc = service(&temp);

    let err = svc.status("../etc").await.unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::Validation(ref e) if matches!(**e, ValidationError::InvalidSessionId)
    ));

    let env = Envelope::from(svc.clone_repository("a/b", "https://github.com/o/r", None).await);
    insta::assert_snapshot!(
        serde_json::to_string(&env).unwrap(),
        @r#"{"success":false,"kind":"validation","error":"Invalid session ID"}"#
    );
}

#[tokio::test]
async fn test_missing_workspace() {
    let temp = temp_dir();
    let svc = service(&temp);

    let err = svc.list_branches("nobody").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(matches!(
        err,
        WorkspaceError::Precondition(ref e) if matches!(**e, PreconditionError::NoRepository)
    ));
}

#[tokio::test]
async fn test_reset_mode_checked_before_git() {
    let temp = temp_dir();
    let svc = service(&temp);
    init_repo(&svc.workspaces().base_dir().join("s1"));

    let err = svc.reset("s1", "nonsense", None).await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Invalid reset mode. Use 'soft', 'mixed', or 'hard'");
}

#[tokio::test]
async fn test_list_workspaces_skips_staging_and_plain_dirs() {
    let temp = temp_dir();
    let svc = service(&temp);
    let base = svc.workspaces().base_dir().to_path_buf();
    init_repo(&base.join("zeta"));
    init_repo(&base.join("alpha"));
    init_repo(&base.join(".clone-abc123"));
    std::fs::create_dir(base.join("plain")).unwrap();

    let list = svc.list_workspaces().await.unwrap();
    let ids: Vec<_> = list.workspaces.iter().map(|w| w.workspace_id.as_str()).collect();
    assert_eq!(ids, ["alpha", "zeta"]);
    assert_eq!(list.workspaces[0].name, "alpha");
    assert_eq!(list.workspaces[0].commit_count, 0);
    assert!(list.workspaces[0].remote_url.is_none());
    assert!(!list.workspaces[0].has_stash);
}

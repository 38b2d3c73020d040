// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace file tree, reads and writes.
//!
//! ```text
//! read/write: validate_file_path --> resolve_worktree_file --> tokio::fs
//!               (lexical)            (symlinks, containment, no .git)
//!
//! tree: ignore::WalkBuilder, depth-first, sorted by name,
//!       no ignore files honoured, ".git" pruned, errors skipped
//! ```

use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, info};

use super::GitService;
use super::types::{FileContent, FileTree, FileWritten, TreeNode};
use crate::error::{FsError, ValidationError, WorkspaceError, WsResult};
use crate::workspace::validate::{resolve_worktree_file, validate_file_path};

impl GitService {
    /// Recursive listing of the workspace, `.git` excluded.
    ///
    /// Unreadable directories are skipped silently.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidSessionId`, `PreconditionError::NoRepository`,
    /// or an I/O error if the walk task fails.
    pub async fn file_tree(&self, session_id: &str) -> WsResult<FileTree> {
        let path = self.workspaces.require_repo(session_id)?;
        let tree = tokio::task::spawn_blocking(move || build_tree(&path))
            .await
            .map_err(|e| WorkspaceError::from(std::io::Error::other(e)))?;
        Ok(FileTree { tree })
    }

    /// Read a UTF-8 file from the workspace.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidFilePath`, `ValidationError::OutsideWorkspace`,
    /// `ValidationError::GitMetadata`, `FsError::NotFound`, `FsError::NotAFile` or `FsError::NotText`.
    pub async fn read_file(&self, session_id: &str, file_path: &str) -> WsResult<FileContent> {
        let full = self.resolve_file(session_id, file_path)?;

        let meta = match tokio::fs::metadata(&full).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FsError::NotFound(file_path.to_string()).into());
            }
            Err(e) => return Err(FsError::io(&full, e).into()),
        };
        if !meta.is_file() {
            return Err(FsError::NotAFile(file_path.to_string()).into());
        }

        let bytes = tokio::fs::read(&full)
            .await
            .map_err(|e| FsError::io(&full, e))?;
        let content =
            String::from_utf8(bytes).map_err(|_| FsError::NotText(file_path.to_string()))?;
        debug!(session = session_id, file = file_path, bytes = content.len(), "Read file");

        Ok(FileContent {
            content,
            path: file_path.to_string(),
        })
    }

    /// Write `content` to a workspace file, creating parent directories.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidFilePath`, `ValidationError::OutsideWorkspace`,
    /// `ValidationError::GitMetadata`, or `FsError::IoError`.
    pub async fn write_file(
        &self,
        session_id: &str,
        file_path: &str,
        content: &str,
    ) -> WsResult<FileWritten> {
        let full = self.resolve_file(session_id, file_path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FsError::io(parent, e))?;
        }
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| FsError::io(&full, e))?;
        info!(session = session_id, file = file_path, bytes = content.len(), "Wrote file");

        Ok(FileWritten {
            message: "File written successfully".to_string(),
            path: file_path.to_string(),
        })
    }

    fn resolve_file(&self, session_id: &str, file_path: &str) -> WsResult<std::path::PathBuf> {
        self.workspaces.resolve(session_id)?;
        if !validate_file_path(file_path) {
            return Err(ValidationError::InvalidFilePath.into());
        }
        let root = self.workspaces.require_repo(session_id)?;
        resolve_worktree_file(&root, file_path)
    }
}

/// Directory being filled while the walk is inside it.
struct Frame {
    name: String,
    path: String,
    children: Vec<TreeNode>,
}

impl Frame {
    fn close(self) -> TreeNode {
        TreeNode::Directory {
            name: self.name,
            path: self.path,
            children: self.children,
        }
    }
}

/// Nested tree of `root`, built from a sorted depth-first walk.
pub(super) fn build_tree(root: &Path) -> Vec<TreeNode> {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.filter_entry(|entry| entry.file_name() != ".git");

    let mut top: Vec<TreeNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for entry in builder.build().filter_map(Result::ok) {
        let depth = entry.depth();
        if depth == 0 {
            continue;
        }
        while stack.len() >= depth {
            if let Some(frame) = stack.pop() {
                push_node(&mut stack, &mut top, frame.close());
            }
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_string_lossy()
            .into_owned();

        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            stack.push(Frame {
                name,
                path,
                children: Vec::new(),
            });
        } else {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            push_node(&mut stack, &mut top, TreeNode::File { name, path, size });
        }
    }

    while let Some(frame) = stack.pop() {
        push_node(&mut stack, &mut top, frame.close());
    }
    top
}

fn push_node(stack: &mut [Frame], top: &mut Vec<TreeNode>, node: TreeNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace operation dispatch.
//!
//! ```text
//! WorkspaceCommand --> GitService::<operation> --> Envelope --> JSON on stdout
//!                                                     |
//!                                                     v
//!                                          success flag -> exit status
//! ```

use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::cli::workspace::{StashSubcommand, TagSubcommand, UserSubcommand, WorkspaceCommand};
use crate::config::Config;
use crate::error::{Result, WsResult};
use crate::service::GitService;
use crate::workspace::Envelope;

/// Run one workspace operation and print its JSON result.
///
/// Returns whether the operation succeeded. Operation failures are part of the
/// printed result; only setup problems surface as `Err`.
///
/// # Errors
///
/// Returns an error if the service cannot be created, stdin cannot be read
/// for `write`, or the result cannot be serialized.
pub async fn run_workspace_command(command: &WorkspaceCommand, config: &Config) -> Result<bool> {
    let service = GitService::new(config)?;

    match command {
        WorkspaceCommand::Clone(args) => emit(
            service
                .clone_repository(&args.session, &args.url, args.branch.as_deref())
                .await,
        ),
        WorkspaceCommand::Status(args) => emit(service.status(&args.session).await),
        WorkspaceCommand::Commit(args) => {
            let files = (!args.files.is_empty()).then_some(args.files.as_slice());
            emit(
                service
                    .commit(
                        &args.session,
                        &args.message,
                        &args.author_name,
                        &args.author_email,
                        files,
                    )
                    .await,
            )
        }
        WorkspaceCommand::Push(args) => emit(
            service
                .push(&args.session, args.remote.as_deref(), args.branch.as_deref())
                .await,
        ),
        WorkspaceCommand::Pull(args) => emit(
            service
                .pull(&args.session, args.remote.as_deref(), args.branch.as_deref())
                .await,
        ),
        WorkspaceCommand::Branches(args) => emit(service.list_branches(&args.session).await),
        WorkspaceCommand::Branch(args) => emit(
            service
                .create_branch(&args.session, &args.name, args.checkout)
                .await,
        ),
        WorkspaceCommand::Checkout(args) => {
            emit(service.checkout_branch(&args.session, &args.name).await)
        }
        WorkspaceCommand::Tree(args) => emit(service.file_tree(&args.session).await),
        WorkspaceCommand::Read(args) => emit(service.read_file(&args.session, &args.path).await),
        WorkspaceCommand::Write(args) => {
            let content = match &args.content {
                Some(content) => content.clone(),
                None => read_stdin().await?,
            };
            emit(
                service
                    .write_file(&args.session, &args.path, &content)
                    .await,
            )
        }
        WorkspaceCommand::Stash(args) => match &args.subcommand {
            StashSubcommand::Save {
                session,
                message,
                include_untracked,
            } => emit(
                service
                    .stash(session, message.as_deref(), *include_untracked)
                    .await,
            ),
            StashSubcommand::List(args) => emit(service.list_stashes(&args.session).await),
            StashSubcommand::Apply(args) => {
                emit(service.apply_stash(&args.session, args.index).await)
            }
            StashSubcommand::Pop(args) => emit(service.pop_stash(&args.session, args.index).await),
        },
        WorkspaceCommand::Log(args) => emit(
            service
                .commit_log(&args.session, args.max_count, args.branch.as_deref())
                .await,
        ),
        WorkspaceCommand::Diff(args) => emit(
            service
                .diff(
                    &args.session,
                    args.commit1.as_deref(),
                    args.commit2.as_deref(),
                    args.path.as_deref(),
                )
                .await,
        ),
        WorkspaceCommand::Merge(args) => emit(
            service
                .merge(&args.session, &args.branch, args.message.as_deref())
                .await,
        ),
        WorkspaceCommand::Reset(args) => emit(
            service
                .reset(&args.session, &args.mode, args.commit.as_deref())
                .await,
        ),
        WorkspaceCommand::Tag(args) => match &args.subcommand {
            TagSubcommand::Create {
                session,
                name,
                message,
                commit,
            } => emit(
                service
                    .create_tag(session, name, message.as_deref(), commit.as_deref())
                    .await,
            ),
            TagSubcommand::List(args) => emit(service.list_tags(&args.session).await),
        },
        WorkspaceCommand::User(args) => match &args.subcommand {
            UserSubcommand::Set {
                session,
                name,
                email,
                scope,
            } => emit(
                service
                    .configure_user(session, name, email, (*scope).into())
                    .await,
            ),
            UserSubcommand::Get(args) => emit(service.get_user_config(&args.session).await),
        },
        WorkspaceCommand::Credentials(args) => emit(
            service
                .configure_credentials(&args.session, &args.token, &args.username)
                .await,
        ),
        WorkspaceCommand::Workspaces => emit(service.list_workspaces().await),
    }
}

/// Print a result envelope as pretty JSON and report its success flag.
fn emit<T: Serialize>(result: WsResult<T>) -> Result<bool> {
    let envelope = Envelope::from(result);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(envelope.is_success())
}

async fn read_stdin() -> Result<String> {
    let mut content = String::new();
    tokio::io::stdin().read_to_string(&mut content).await?;
    Ok(content)
}

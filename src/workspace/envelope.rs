// collab-git: CodeCollab Workspace Git Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Uniform operation result.
//!
//! ```text
//! Ok(T)   -> {"success": true,  ...fields of T}
//! Err(e)  -> {"success": false, "kind": .., "error": .., "message": hint?}
//! ```

use serde::{Serialize, Serializer};

use crate::error::{ErrorKind, WorkspaceError, WsResult};

/// Failure half of an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub error: String,
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&WorkspaceError> for Failure {
    fn from(err: &WorkspaceError) -> Self {
        Self {
            kind: err.kind(),
            error: err.to_string(),
            hint: err.hint(),
        }
    }
}

/// Operation result as handed to callers. `T` must serialize as a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T> From<WsResult<T>> for Envelope<T> {
    fn from(result: WsResult<T>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::Failure(Failure::from(&err)),
        }
    }
}

#[derive(Serialize)]
struct SuccessRepr<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct FailureRepr<'a> {
    success: bool,
    #[serde(flatten)]
    failure: &'a Failure,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(payload) => SuccessRepr {
                success: true,
                payload,
            }
            .serialize(serializer),
            Self::Failure(failure) => FailureRepr {
                success: false,
                failure,
            }
            .serialize(serializer),
        }
    }
}

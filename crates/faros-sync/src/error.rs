// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for faros-sync.

use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;

use crate::types::JobId;

/// Result type using SyncError.
pub type Result<T> = std::result::Result<T, SyncError>;

/// A failed call to a remote service.
///
/// The display form is `"<context>: <cause>"`. The cause keeps only the
/// top-level transport message and is reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{context}: {cause}")]
pub struct ApiError {
    context: String,
    #[source]
    cause: ApiCause,
}

/// The truncated cause wrapped by an [`ApiError`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ApiCause(String);

impl ApiError {
    /// Wrap a cause with a human-readable context message.
    pub fn new(context: impl Into<String>, cause: impl Display) -> Self {
        Self {
            context: context.into(),
            cause: ApiCause(cause.to_string()),
        }
    }

    /// The caller-supplied context message.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The inner cause message.
    pub fn cause(&self) -> &str {
        &self.cause.0
    }
}

/// The sync engine must contain exactly one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// The sync engine has not been initialized yet.
    #[error("no workspace found")]
    NoneFound,

    /// More than one workspace exists.
    #[error("ambiguous workspace: found {0} workspaces, expected exactly one")]
    Ambiguous(usize),
}

/// Errors that can occur while orchestrating connector syncs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed (network, non-2xx status or malformed body).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The sync engine never reported itself healthy.
    #[error("sync engine not healthy after {attempts} attempts")]
    HealthCheckTimeout {
        attempts: u32,
        #[source]
        cause: ApiError,
    },

    /// Zero or several workspaces were found.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// No object with the given name exists.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A sync job ended in a non-success terminal state.
    #[error("sync {status}, see logs at {logs_url}")]
    SyncFailed { status: String, logs_url: String },

    /// Job polling exceeded the configured limit.
    #[error("job {job_id} still running after {elapsed:?}")]
    PollTimeout { job_id: JobId, elapsed: Duration },

    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SyncError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        SyncError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether this error means a name lookup came up empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::Config(format!("invalid URL: {}", err))
    }
}

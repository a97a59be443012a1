// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Remote objects of the sync engine and the outcomes of driving them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SyncError;

/// Opaque workspace identifier assigned by the sync engine.
pub type WorkspaceId = String;
/// Opaque source identifier assigned by the sync engine.
pub type SourceId = String;
/// Opaque connection identifier assigned by the sync engine.
pub type ConnectionId = String;
/// Opaque source definition identifier.
pub type SourceDefinitionId = String;
/// Numeric job identifier assigned when a sync is triggered.
pub type JobId = i64;

/// The sync engine's top-level container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub initial_setup_complete: bool,
}

/// A configured source as listed by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub source_id: SourceId,
    pub name: String,
}

/// A source-to-destination binding as listed by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummary {
    pub connection_id: ConnectionId,
    pub name: String,
}

/// A connector type installed in the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDefinitionSummary {
    pub source_definition_id: SourceDefinitionId,
    pub name: String,
}

/// Anything the registry can look up by exact name.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

impl Named for SourceSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ConnectionSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for SourceDefinitionSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Status of a sync job.
///
/// `Running` is the only non-terminal value. Values the engine reports that
/// are not listed here are kept verbatim in `Other` and are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
    Incomplete,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Incomplete => "incomplete",
            JobStatus::Other(s) => s,
        }
    }

    /// Check if this status means polling must stop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "running" => JobStatus::Running,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "cancelled" => JobStatus::Cancelled,
            "incomplete" => JobStatus::Incomplete,
            _ => JobStatus::Other(value),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(value: &str) -> Self {
        JobStatus::from(value.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which source a descriptor configures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTarget {
    /// Update a source the sync engine already knows.
    Existing(SourceId),
    /// Create a source from an installed connector definition.
    New {
        workspace_id: WorkspaceId,
        source_definition_id: SourceDefinitionId,
    },
}

/// A named source configuration submitted to the sync engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDescriptor {
    pub name: String,
    pub target: SourceTarget,
    pub connection_configuration: Value,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, target: SourceTarget, configuration: Value) -> Self {
        Self {
            name: name.into(),
            target,
            connection_configuration: configuration,
        }
    }
}

/// Why a tracked sync did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The job reached a terminal status other than `succeeded`.
    Status(JobStatus),
    /// The job could not be triggered.
    TriggerFailed(String),
    /// Polling the job status failed.
    PollFailed(String),
    /// The job kept running past the configured poll timeout.
    TimedOut(Duration),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(status) => write!(f, "{}", status),
            FailureReason::TriggerFailed(err) => write!(f, "could not be triggered ({})", err),
            FailureReason::PollFailed(err) => write!(f, "status unavailable ({})", err),
            FailureReason::TimedOut(after) => write!(f, "timed out after {:?}", after),
        }
    }
}

/// Details of a sync that ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Job ID, if triggering succeeded.
    pub job_id: Option<JobId>,
    pub reason: FailureReason,
    /// Link to the connection's logs in the sync engine UI.
    pub logs_url: String,
    /// Number of status polls issued.
    pub polls: u32,
}

impl SyncFailure {
    /// Last observed terminal status, if the job got that far.
    pub fn status(&self) -> Option<&JobStatus> {
        match &self.reason {
            FailureReason::Status(status) => Some(status),
            _ => None,
        }
    }
}

/// Final state of [`crate::SyncJobRunner::run_and_track`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Succeeded { job_id: JobId, polls: u32 },
    Failed(SyncFailure),
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Succeeded { .. })
    }

    pub fn polls(&self) -> u32 {
        match self {
            SyncOutcome::Succeeded { polls, .. } => *polls,
            SyncOutcome::Failed(failure) => failure.polls,
        }
    }

    /// Turn a failed outcome into [`SyncError::SyncFailed`].
    pub fn into_result(self) -> Result<JobId, SyncError> {
        match self {
            SyncOutcome::Succeeded { job_id, .. } => Ok(job_id),
            SyncOutcome::Failed(SyncFailure {
                job_id: Some(job_id),
                reason: FailureReason::TimedOut(elapsed),
                ..
            }) => Err(SyncError::PollTimeout { job_id, elapsed }),
            SyncOutcome::Failed(failure) => Err(SyncError::SyncFailed {
                status: failure.reason.to_string(),
                logs_url: failure.logs_url,
            }),
        }
    }
}

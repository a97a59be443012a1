// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Triggering sync jobs and polling them to a terminal status.
//!
//! State machine of [`SyncJobRunner::run_and_track`]:
//!
//! ```text
//! Triggering --ok--> Polling --"running"--> Polling
//!     |                 |
//!     |                 +--"succeeded"--> Succeeded
//!     |                 +--other-------> Failed
//!     +--error--------------------------> Failed
//! ```

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::airbyte::AirbyteClient;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::progress::{NoProgress, SyncProgress};
use crate::types::{FailureReason, JobId, JobStatus, SyncFailure, SyncOutcome};

static NO_PROGRESS: NoProgress = NoProgress;

#[derive(Debug, Deserialize)]
struct JobInfoRead {
    job: JobRead,
}

#[derive(Debug, Deserialize)]
struct JobRead {
    id: JobId,
    #[serde(default)]
    status: Option<JobStatus>,
}

#[derive(Debug, Deserialize)]
struct JobStatusRead {
    job: JobStatusOnly,
}

#[derive(Debug, Deserialize)]
struct JobStatusOnly {
    status: JobStatus,
}

/// Triggers a connection's sync and tracks it until it ends.
///
/// Failed syncs are reported, never retried.
#[derive(Clone, Copy)]
pub struct SyncJobRunner<'a> {
    client: &'a AirbyteClient,
    poll_interval: Duration,
    poll_timeout: Option<Duration>,
    progress: &'a dyn SyncProgress,
}

impl<'a> SyncJobRunner<'a> {
    /// Runner with a 1 second poll interval, no timeout and no progress output.
    pub fn new(client: &'a AirbyteClient) -> Self {
        Self::from_config(client, &SyncConfig::default())
    }

    /// Runner using the poll settings of `config`.
    pub fn from_config(client: &'a AirbyteClient, config: &SyncConfig) -> Self {
        Self {
            client,
            poll_interval: config.poll_interval,
            poll_timeout: config.poll_timeout,
            progress: &NO_PROGRESS,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn SyncProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress(&self) -> &'a dyn SyncProgress {
        self.progress
    }

    /// Start a sync job for the connection.
    #[instrument(skip(self))]
    pub async fn trigger_sync(&self, connection_id: &str) -> Result<JobId> {
        let info: JobInfoRead = self
            .client
            .api()
            .post(
                "/connections/sync",
                &json!({ "connectionId": connection_id }),
                "failed to trigger sync",
            )
            .await?;
        info!(job_id = info.job.id, status = ?info.job.status, "Sync triggered");
        Ok(info.job.id)
    }

    /// Current status of a job.
    pub async fn get_job_status(&self, job_id: JobId) -> Result<JobStatus> {
        let read: JobStatusRead = self
            .client
            .api()
            .post(
                "/jobs/get",
                &json!({ "id": job_id }),
                "failed to get job status",
            )
            .await?;
        Ok(read.job.status)
    }

    /// Trigger a sync and poll until the job reaches a terminal status.
    ///
    /// Sync-phase errors end in [`SyncOutcome::Failed`] instead of an `Err`.
    /// Without a poll timeout this waits as long as the job keeps running.
    #[instrument(skip(self))]
    pub async fn run_and_track(&self, connection_id: &str) -> SyncOutcome {
        let outcome = self.track(connection_id).await;
        match &outcome {
            SyncOutcome::Succeeded { job_id, polls } => {
                info!(job_id, polls, "Sync succeeded");
            }
            SyncOutcome::Failed(failure) => {
                warn!(job_id = ?failure.job_id, reason = %failure.reason, "Sync did not succeed");
            }
        }
        self.progress.finish(&outcome);
        outcome
    }

    async fn track(&self, connection_id: &str) -> SyncOutcome {
        let failed = |job_id: Option<JobId>, reason: FailureReason, polls: u32| {
            SyncOutcome::Failed(SyncFailure {
                job_id,
                reason,
                logs_url: self.client.connection_status_url(connection_id),
                polls,
            })
        };

        let job_id = match self.trigger_sync(connection_id).await {
            Ok(job_id) => job_id,
            Err(e) => return failed(None, FailureReason::TriggerFailed(e.to_string()), 0),
        };

        let started = Instant::now();
        let mut polls = 0;

        loop {
            self.progress.tick();
            polls += 1;

            let status = match self.get_job_status(job_id).await {
                Ok(status) => status,
                Err(e) => {
                    return failed(Some(job_id), FailureReason::PollFailed(e.to_string()), polls);
                }
            };
            debug!(job_id, polls, status = %status, "Polled job");

            if status.is_success() {
                return SyncOutcome::Succeeded { job_id, polls };
            }
            if status.is_terminal() {
                return failed(Some(job_id), FailureReason::Status(status), polls);
            }

            if let Some(limit) = self.poll_timeout {
                let elapsed = started.elapsed();
                if elapsed >= limit {
                    return failed(Some(job_id), FailureReason::TimedOut(elapsed), polls);
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Health polling with a bounded number of fixed-interval attempts.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::client::ServiceClient;
use crate::error::{ApiError, Result, SyncError};

/// Fixed-interval retry policy for health checks.
///
/// The interval is constant: the remote service has a roughly bounded startup
/// time, so there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub attempts: u32,
    /// Delay between two attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 6,
            interval: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }
}

/// Waits for a service to report itself healthy.
#[derive(Debug, Clone)]
pub struct HealthWaiter {
    policy: RetryPolicy,
    path: String,
    field: String,
}

impl HealthWaiter {
    /// Waiter for the sync engine: `GET /health`, healthy when `available` is true.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_probe(policy, "/health", "available")
    }

    /// Waiter for an arbitrary health path and boolean response field.
    pub fn with_probe(policy: RetryPolicy, path: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            policy,
            path: path.into(),
            field: field.into(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Poll until healthy or until every attempt has been used.
    ///
    /// Fails with [`SyncError::HealthCheckTimeout`] wrapping the last cause.
    #[instrument(skip_all, fields(url = %client.base_url(), attempts = self.policy.attempts))]
    pub async fn wait_until_healthy(&self, client: &ServiceClient) -> Result<()> {
        let attempts = self.policy.attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.probe(client).await {
                Ok(()) => {
                    info!(attempt, "Service is healthy");
                    return Ok(());
                }
                Err(cause) if attempt >= attempts => {
                    warn!(attempt, error = %cause, "Giving up on health check");
                    return Err(SyncError::HealthCheckTimeout { attempts, cause });
                }
                Err(cause) => {
                    warn!(attempt, error = %cause, "Health check failed, retrying");
                }
            }

            attempt += 1;
            tokio::time::sleep(self.policy.interval).await;
        }
    }

    async fn probe(&self, client: &ServiceClient) -> std::result::Result<(), ApiError> {
        const CONTEXT: &str = "could not connect to the sync engine";

        let body: Value = client.get(&self.path, CONTEXT).await?;
        if is_available(&body, &self.field) {
            Ok(())
        } else {
            Err(ApiError::new(CONTEXT, "service is not healthy yet"))
        }
    }
}

/// A missing or non-boolean field counts as unhealthy.
fn is_available(body: &Value, field: &str) -> bool {
    body.get(field).and_then(Value::as_bool).unwrap_or(false)
}

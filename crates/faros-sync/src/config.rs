// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for sync orchestration.

use std::time::Duration;

use crate::error::{Result, SyncError};
use crate::health::RetryPolicy;

/// Default sync engine URL.
pub const DEFAULT_AIRBYTE_URL: &str = "http://localhost:8000";

/// Configuration shared by the sync-engine components.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Sync engine base URL (without `/api/v1`).
    pub airbyte_url: String,
    /// Retry policy for the health check.
    pub health_retry: RetryPolicy,
    /// Delay between job status polls.
    pub poll_interval: Duration,
    /// Upper bound on job polling. `None` polls until a terminal status.
    pub poll_timeout: Option<Duration>,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
    /// Emit progress ticks while polling.
    pub show_progress: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            airbyte_url: DEFAULT_AIRBYTE_URL.to_string(),
            health_retry: RetryPolicy::default(),
            poll_interval: Duration::from_secs(1),
            poll_timeout: None,
            request_timeout: Duration::from_secs(30),
            show_progress: true,
        }
    }
}

impl SyncConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a sync engine on localhost.
    pub fn localhost() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FAROS_AIRBYTE_URL`: Sync engine URL (default: "http://localhost:8000")
    /// - `FAROS_HEALTH_RETRIES`: Health check attempts (default: 6)
    /// - `FAROS_HEALTH_INTERVAL_MS`: Delay between health checks (default: 1000)
    /// - `FAROS_POLL_INTERVAL_MS`: Delay between job polls (default: 1000)
    /// - `FAROS_POLL_TIMEOUT_SECS`: Give up polling after this long (default: unset)
    /// - `FAROS_REQUEST_TIMEOUT_MS`: HTTP request timeout (default: 30000)
    /// - `FAROS_SILENT`: When set, progress ticks are suppressed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let airbyte_url =
            std::env::var("FAROS_AIRBYTE_URL").unwrap_or_else(|_| DEFAULT_AIRBYTE_URL.to_string());

        let attempts = parse_env("FAROS_HEALTH_RETRIES")?.unwrap_or(defaults.health_retry.attempts);
        let interval_ms = parse_env("FAROS_HEALTH_INTERVAL_MS")?
            .unwrap_or(defaults.health_retry.interval.as_millis() as u64);
        let poll_ms = parse_env("FAROS_POLL_INTERVAL_MS")?
            .unwrap_or(defaults.poll_interval.as_millis() as u64);
        let poll_timeout = parse_env::<u64>("FAROS_POLL_TIMEOUT_SECS")?.map(Duration::from_secs);
        let request_ms = parse_env("FAROS_REQUEST_TIMEOUT_MS")?
            .unwrap_or(defaults.request_timeout.as_millis() as u64);

        Ok(Self {
            airbyte_url: normalize_url(&airbyte_url),
            health_retry: RetryPolicy::new(attempts, Duration::from_millis(interval_ms)),
            poll_interval: Duration::from_millis(poll_ms),
            poll_timeout,
            request_timeout: Duration::from_millis(request_ms),
            show_progress: std::env::var_os("FAROS_SILENT").is_none(),
        })
    }

    /// Set the sync engine URL. Trailing slashes are dropped.
    pub fn with_airbyte_url(mut self, url: impl AsRef<str>) -> Self {
        self.airbyte_url = normalize_url(url.as_ref());
        self
    }

    /// Set the health check retry policy.
    pub fn with_health_retry(mut self, policy: RetryPolicy) -> Self {
        self.health_retry = policy;
        self
    }

    /// Set the delay between job polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bound job polling.
    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable or disable progress ticks.
    pub fn with_show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SyncError::Config(format!("invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

pub(crate) fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.airbyte_url, "http://localhost:8000");
        assert_eq!(config.health_retry.attempts, 6);
        assert_eq!(config.health_retry.interval, Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.poll_timeout.is_none());
        assert!(config.show_progress);
    }

    #[test]
    fn test_builder_methods() {
        let config = SyncConfig::new()
            .with_airbyte_url("http://airbyte.internal:8000///")
            .with_health_retry(RetryPolicy::new(3, Duration::from_millis(50)))
            .with_poll_interval(Duration::from_millis(200))
            .with_poll_timeout(Some(Duration::from_secs(600)))
            .with_request_timeout(Duration::from_secs(5))
            .with_show_progress(false);

        assert_eq!(config.airbyte_url, "http://airbyte.internal:8000");
        assert_eq!(config.health_retry.attempts, 3);
        assert_eq!(config.poll_interval, Duration::from_millis(200));
        assert_eq!(config.poll_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(" http://x:8000/ "), "http://x:8000");
        assert_eq!(normalize_url("http://x"), "http://x");
    }
}

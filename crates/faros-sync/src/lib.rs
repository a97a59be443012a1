// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Faros Sync
//!
//! Orchestration of connector syncs in an Airbyte sync engine.
//!
//! # Architecture
//!
//! Components, leaves first:
//! - [`ServiceClient`]: JSON-over-HTTP wrapper bound to one base URL
//! - [`HealthWaiter`]: fixed-interval, bounded health polling
//! - [`ConnectorRegistry`]: resolves names to the IDs the sync engine assigns
//! - [`ConnectorConfigurator`]: validate-then-commit source upserts
//! - [`SyncJobRunner`]: triggers a sync and polls it to a terminal status
//! - [`RefreshCoordinator`]: concurrent re-syncs of every active connector
//!
//! None of them cache remote state between calls.
//!
//! # Example
//!
//! ```no_run
//! use faros_sync::{
//!     AirbyteClient, ConnectorKind, ConnectorRegistry, HealthWaiter, SyncConfig, SyncJobRunner,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyncConfig::from_env()?;
//! let client = AirbyteClient::new(&config)?;
//!
//! HealthWaiter::new(config.health_retry)
//!     .wait_until_healthy(client.api())
//!     .await?;
//!
//! let registry = ConnectorRegistry::new(&client);
//! let connection_id = registry
//!     .find_connection_id_by_name(&ConnectorKind::GitHub.connection_name())
//!     .await?;
//!
//! let outcome = SyncJobRunner::from_config(&client, &config)
//!     .run_and_track(&connection_id)
//!     .await;
//! println!("Succeeded: {}", outcome.is_success());
//! # Ok(())
//! # }
//! ```

mod airbyte;
mod client;
mod config;
mod configurator;
mod connectors;
mod error;
mod health;
mod jobs;
mod metabase;
mod progress;
mod refresh;
mod registry;
mod types;

pub use airbyte::AirbyteClient;
pub use client::{HttpMethod, ServiceClient};
pub use config::{DEFAULT_AIRBYTE_URL, SyncConfig};
pub use configurator::ConnectorConfigurator;
pub use connectors::{
    BitbucketAuth, BitbucketSettings, ConnectorKind, ConnectorSettings, DEFAULT_CUTOFF_DAYS,
    DESTINATION_NAME, FarosGitHubSettings, GitHubAuth, GitHubSettings, GitLabSettings,
    JiraSettings, start_date,
};
pub use error::{ApiCause, ApiError, Result, SyncError, WorkspaceError};
pub use health::{HealthWaiter, RetryPolicy};
pub use jobs::SyncJobRunner;
pub use metabase::{MetabaseClient, MetabaseConfig, resync_dashboards};
pub use progress::{NoProgress, SyncProgress};
pub use refresh::{RefreshCoordinator, RefreshReport};
pub use registry::ConnectorRegistry;
pub use types::{
    ConnectionId, ConnectionSummary, FailureReason, JobId, JobStatus, SourceDefinitionId,
    SourceDefinitionSummary, SourceDescriptor, SourceId, SourceSummary, SourceTarget,
    SyncFailure, SyncOutcome, Workspace, WorkspaceId,
};

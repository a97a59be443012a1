// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Re-syncing every connector that was set up and last synced successfully.

use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::airbyte::AirbyteClient;
use crate::connectors::ConnectorKind;
use crate::jobs::SyncJobRunner;
use crate::progress::SharedProgress;
use crate::registry::ConnectorRegistry;
use crate::types::{ConnectionId, SyncOutcome};

/// What happened to each connector during a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Connectors whose sync was run, with its outcome.
    pub refreshed: Vec<(ConnectorKind, SyncOutcome)>,
    /// Connectors that are not configured or whose last sync did not succeed.
    pub skipped: Vec<ConnectorKind>,
    /// Connectors whose activity check errored.
    pub failed: Vec<(ConnectorKind, String)>,
}

impl RefreshReport {
    /// True when no connector was active.
    pub fn nothing_to_refresh(&self) -> bool {
        self.refreshed.is_empty()
    }

    pub fn any_succeeded(&self) -> bool {
        self.refreshed.iter().any(|(_, outcome)| outcome.is_success())
    }

    /// Connectors that errored or whose sync did not succeed.
    pub fn failed_connectors(&self) -> Vec<ConnectorKind> {
        self.failed
            .iter()
            .map(|(kind, _)| *kind)
            .chain(
                self.refreshed
                    .iter()
                    .filter(|(_, outcome)| !outcome.is_success())
                    .map(|(kind, _)| *kind),
            )
            .collect()
    }
}

/// Runs concurrent re-syncs of all active connectors.
///
/// Each connector is isolated: an error for one never stops the others.
#[derive(Clone, Copy)]
pub struct RefreshCoordinator<'a> {
    client: &'a AirbyteClient,
    runner: SyncJobRunner<'a>,
}

impl<'a> RefreshCoordinator<'a> {
    pub fn new(client: &'a AirbyteClient, runner: SyncJobRunner<'a>) -> Self {
        Self { client, runner }
    }

    /// Check every connector and re-sync the active ones concurrently.
    #[instrument(skip(self))]
    pub async fn refresh_all(&self, connectors: &[ConnectorKind]) -> RefreshReport {
        let registry = ConnectorRegistry::new(self.client);
        let mut report = RefreshReport::default();
        let mut active: Vec<(ConnectorKind, ConnectionId)> = Vec::new();

        for &kind in connectors {
            match registry.active_connection_id(&kind.connection_name()).await {
                Ok(Some(connection_id)) => {
                    info!(connector = %kind, "Refreshing");
                    active.push((kind, connection_id));
                }
                Ok(None) => report.skipped.push(kind),
                Err(e) if e.is_not_found() => report.skipped.push(kind),
                Err(e) => {
                    warn!(connector = %kind, error = %e, "Could not check connector");
                    report.failed.push((kind, e.to_string()));
                }
            }
        }

        if active.is_empty() {
            info!("Nothing to refresh");
            return report;
        }

        let progress = SharedProgress::new(self.runner.progress(), active.len());
        let runner = self.runner.with_progress(&progress);
        let runs = active.iter().map(|(kind, connection_id)| async move {
            (*kind, runner.run_and_track(connection_id).await)
        });
        report.refreshed = join_all(runs).await;
        report
    }
}

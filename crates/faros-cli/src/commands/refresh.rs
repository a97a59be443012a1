// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorKind, RefreshCoordinator, RefreshReport, SyncOutcome, resync_dashboards};

use super::{Context, failure_message};
use crate::display::{Emoji, display, error_log, warn};
use crate::error::CliResult;

/// Re-sync every connector whose last sync succeeded.
///
/// Only the health check can fail the command; per-connector problems are
/// reported.
pub async fn run(ctx: &Context<'_>) -> CliResult<RefreshReport> {
    ctx.wait_until_healthy().await?;

    let report = RefreshCoordinator::new(&ctx.client, ctx.runner())
        .refresh_all(&ConnectorKind::ALL)
        .await;

    if report.nothing_to_refresh() {
        display("nothing to refresh");
    }
    for (kind, error) in &report.failed {
        warn(format!("Could not check {}: {}", kind, error));
    }
    for (kind, outcome) in &report.refreshed {
        match outcome {
            SyncOutcome::Succeeded { .. } => {
                display(format!("{} refreshed {}", kind, Emoji::Success));
            }
            SyncOutcome::Failed(failure) => {
                error_log(format!("{}: {}", kind, failure_message(failure)));
            }
        }
    }

    if report.any_succeeded() {
        resync_dashboards(&ctx.metabase).await;
    }
    Ok(report)
}

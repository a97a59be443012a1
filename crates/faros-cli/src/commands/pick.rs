// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorKind, SyncOutcome};

use super::{Context, bitbucket, faros_github, github, gitlab, jira};
use crate::error::{CliError, CliResult};

/// Ask which connector to set up, then run its flow with no flags.
pub async fn run(ctx: &Context<'_>) -> CliResult<Option<SyncOutcome>> {
    let choices: Vec<String> = ConnectorKind::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect();
    let index = ctx.prompts.select("Select a source", &choices)?;
    let kind = ConnectorKind::ALL
        .get(index)
        .copied()
        .ok_or_else(|| CliError::Input(format!("no source at index {}", index)))?;

    match kind {
        ConnectorKind::GitHub => github::run(ctx, Default::default()).await,
        ConnectorKind::GitLab => gitlab::run(ctx, Default::default()).await,
        ConnectorKind::Bitbucket => bitbucket::run(ctx, Default::default()).await,
        ConnectorKind::Jira => jira::run(ctx, Default::default()).await,
        ConnectorKind::FarosGitHub => faros_github::run(ctx, Default::default()).await,
    }
}

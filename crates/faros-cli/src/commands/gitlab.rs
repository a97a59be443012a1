// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorSettings, GitLabSettings, SyncOutcome};

use super::{Context, choose_items, or_prompt, setup_and_sync};
use crate::cli::GitlabArgs;
use crate::display::display;
use crate::error::CliResult;

/// `None` when no project was selected.
pub async fn run(ctx: &Context<'_>, args: GitlabArgs) -> CliResult<Option<SyncOutcome>> {
    ctx.wait_until_healthy().await?;

    let api_url = or_prompt(args.api_url, || {
        ctx.prompts.input("Enter the API URL (e.g. gitlab.com)")
    })?;
    let token = or_prompt(args.token, || {
        ctx.prompts.password("Enter your Personal Access Token")
    })?;

    let projects = match args.project_list {
        Some(list) => list.0,
        None => {
            choose_items(
                ctx.prompts,
                "projects",
                "airbyte.io/documentation, meltano/tap-gitlab",
                || ctx.providers.gitlab_projects(&api_url, &token),
            )
            .await?
        }
    };
    if projects.is_empty() {
        display("No projects selected");
        return Ok(None);
    }

    let settings = ConnectorSettings::GitLab(GitLabSettings {
        api_url,
        token,
        projects,
        cutoff_days: args.cutoff_days,
    });
    setup_and_sync(ctx, &settings).await.map(Some)
}

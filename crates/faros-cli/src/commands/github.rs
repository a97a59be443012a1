// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorSettings, GitHubSettings, SyncOutcome};

use super::{Context, choose_items, or_prompt, setup_and_sync};
use crate::cli::GithubArgs;
use crate::display::display;
use crate::error::CliResult;

/// `None` when no repository was selected.
pub async fn run(ctx: &Context<'_>, args: GithubArgs) -> CliResult<Option<SyncOutcome>> {
    ctx.wait_until_healthy().await?;

    let token = or_prompt(args.token, || ctx.prompts.password("Personal Access Token?"))?;

    let repositories = match args.repo_list {
        Some(list) => list.0,
        None => {
            choose_items(ctx.prompts, "repos", "faros-ai/faros-community-edition", || {
                ctx.providers.github_repos(&token)
            })
            .await?
        }
    };
    if repositories.is_empty() {
        display("No repos selected");
        return Ok(None);
    }

    let settings = ConnectorSettings::GitHub(GitHubSettings {
        token,
        repositories,
        cutoff_days: args.cutoff_days,
    });
    setup_and_sync(ctx, &settings).await.map(Some)
}

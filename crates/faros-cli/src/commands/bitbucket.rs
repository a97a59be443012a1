// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{BitbucketAuth, BitbucketSettings, ConnectorSettings, SyncOutcome};

use super::{Context, choose_items, or_prompt, setup_and_sync};
use crate::cli::BitbucketArgs;
use crate::display::display;
use crate::error::{CliError, CliResult};

const AUTH_METHODS: [&str; 2] = ["Username/Password", "Personal Access Token"];

/// `None` when no repository was selected.
pub async fn run(ctx: &Context<'_>, args: BitbucketArgs) -> CliResult<Option<SyncOutcome>> {
    ctx.wait_until_healthy().await?;

    let auth = authenticate(ctx, args.username, args.password, args.token)?;

    let workspace = match args.workspace {
        Some(workspace) => workspace,
        None => {
            let workspaces = ctx.providers.bitbucket_workspaces(&auth).await?;
            if workspaces.is_empty() {
                return Err(CliError::Validation(
                    "no Bitbucket workspace is visible to these credentials".to_string(),
                ));
            }
            let index = ctx
                .prompts
                .select("Pick your favorite workspace", &workspaces)?;
            workspaces
                .get(index)
                .cloned()
                .ok_or_else(|| CliError::Input(format!("no workspace at index {}", index)))?
        }
    };

    let repositories = match args.repo_list {
        Some(list) => list.0,
        None => {
            choose_items(ctx.prompts, "repos", "my-workspace/api, my-workspace/web", || {
                ctx.providers.bitbucket_repos(&auth, &workspace)
            })
            .await?
        }
    };
    if repositories.is_empty() {
        display("No repos selected");
        return Ok(None);
    }

    let settings = ConnectorSettings::Bitbucket(BitbucketSettings {
        auth,
        workspace,
        repositories,
        cutoff_days: args.cutoff_days,
    });
    setup_and_sync(ctx, &settings).await.map(Some)
}

/// A token wins; any username or password means password auth; otherwise ask.
fn authenticate(
    ctx: &Context<'_>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
) -> CliResult<BitbucketAuth> {
    if let Some(token) = token {
        return Ok(BitbucketAuth::Token(token));
    }

    let use_password = username.is_some()
        || password.is_some()
        || ctx.prompts.select(
            "Choose your authentication method",
            &AUTH_METHODS.map(String::from),
        )? == 0;

    if use_password {
        Ok(BitbucketAuth::Password {
            username: or_prompt(username, || ctx.prompts.input("Username?"))?,
            password: or_prompt(password, || ctx.prompts.password("Password?"))?,
        })
    } else {
        Ok(BitbucketAuth::Token(
            ctx.prompts.password("Personal Access Token?")?,
        ))
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorSettings, FarosGitHubSettings, GitHubAuth, SyncOutcome};

use super::{Context, setup_and_sync};
use crate::cli::{CsvList, FarosGithubArgs};
use crate::display::{Emoji, display};
use crate::error::CliResult;
use crate::prompts::{PromptProvider, ask_until_valid, non_empty};

const AUTH_METHODS: [&str; 2] = ["Personal Access Token", "GitHub App"];

/// Always `Some`; the filters are optional and never prompted for.
pub async fn run(ctx: &Context<'_>, args: FarosGithubArgs) -> CliResult<Option<SyncOutcome>> {
    ctx.wait_until_healthy().await?;

    let auth = authenticate(
        ctx.prompts,
        args.personal_access_token,
        args.app_id,
        args.private_key,
    )?;

    let list = |value: Option<CsvList>| value.map(|list| list.0).unwrap_or_default();
    let settings = ConnectorSettings::FarosGitHub(FarosGitHubSettings {
        url: args.url,
        auth,
        organizations: list(args.organizations),
        excluded_organizations: list(args.excluded_organizations),
        repositories: list(args.repositories),
        excluded_repositories: list(args.excluded_repositories),
        cutoff_days: args.cutoff_days,
    });
    setup_and_sync(ctx, &settings).await.map(Some)
}

/// A token wins, then a complete app id and key pair; otherwise ask.
fn authenticate(
    prompts: &dyn PromptProvider,
    token: Option<String>,
    app_id: Option<u64>,
    private_key: Option<String>,
) -> CliResult<GitHubAuth> {
    if let Some(token) = token {
        return Ok(GitHubAuth::Token(token));
    }
    if let (Some(app_id), Some(private_key)) = (app_id, private_key) {
        return Ok(GitHubAuth::App {
            app_id,
            private_key,
        });
    }

    display(format!(
        "Invalid GitHub authentication. Configure it now. {}",
        Emoji::Warning
    ));
    let method = prompts.select(
        "Select your authentication method",
        &AUTH_METHODS.map(String::from),
    )?;

    if method == 0 {
        let token = ask_until_valid(
            || prompts.password("Enter your GitHub Personal Access Token"),
            non_empty,
            "Personal Access Token cannot be empty",
        )?;
        return Ok(GitHubAuth::Token(token));
    }

    let app_id = ask_until_valid(
        || prompts.input("Enter your GitHub App ID"),
        |answer| answer.parse::<u64>().ok().filter(|id| *id > 0),
        "Please enter a valid integer for the App ID",
    )?;
    let private_key = ask_until_valid(
        || prompts.password("Enter your GitHub App private key"),
        non_empty,
        "Private key cannot be empty",
    )?;
    Ok(GitHubAuth::App {
        app_id,
        private_key,
    })
}

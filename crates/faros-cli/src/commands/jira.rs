// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use faros_sync::{ConnectorSettings, JiraSettings, SyncOutcome};

use super::{Context, choose_items, or_prompt, setup_and_sync};
use crate::cli::JiraArgs;
use crate::display::{display, terminal_link};
use crate::error::CliResult;

const TOKEN_DOCS_URL: &str =
    "https://community.faros.ai/docs/faros-essentials#api-token-requirements";
const SITE_SUFFIX: &str = ".atlassian.net";

/// `None` when no project was selected.
pub async fn run(ctx: &Context<'_>, args: JiraArgs) -> CliResult<Option<SyncOutcome>> {
    ctx.wait_until_healthy().await?;

    if args.token.is_none() {
        display(format!(
            "Visit our {} for token requirements",
            terminal_link("docs", TOKEN_DOCS_URL)
        ));
    }

    let domain = match args.domain {
        Some(domain) => domain,
        None => site_domain(&ctx.prompts.input(
            "Enter your domain (.atlassian.net will be automatically added)",
        )?),
    };
    let email = or_prompt(args.email, || ctx.prompts.input("Enter your email"))?;
    let token = or_prompt(args.token, || {
        ctx.prompts.password("Enter your Personal Access Token")
    })?;

    let projects = match args.project_list {
        Some(list) => list.0,
        None => {
            choose_items(ctx.prompts, "project keys", "FOO, BAR", || {
                ctx.providers.jira_projects(&domain, &email, &token)
            })
            .await?
        }
    };
    if projects.is_empty() {
        display("No projects selected");
        return Ok(None);
    }

    let settings = ConnectorSettings::Jira(JiraSettings {
        email,
        token,
        domain,
        projects,
        cutoff_days: args.cutoff_days,
    });
    setup_and_sync(ctx, &settings).await.map(Some)
}

/// `acme` becomes `acme.atlassian.net`; a full domain is kept.
fn site_domain(input: &str) -> String {
    let input = input.trim();
    if input.ends_with(SITE_SUFFIX) {
        input.to_string()
    } else {
        format!("{}{}", input, SITE_SUFFIX)
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command implementations.
//!
//! Every connector command follows the same path: wait for the sync engine,
//! collect settings (flags first, prompts for the rest), upsert the source,
//! then sync its connection and report the result.

pub mod bitbucket;
pub mod faros_github;
pub mod github;
pub mod gitlab;
pub mod jira;
pub mod pick;
pub mod refresh;

use std::future::Future;

use chrono::Utc;
use faros_sync::{
    AirbyteClient, ConnectorConfigurator, ConnectorKind, ConnectorRegistry, ConnectorSettings,
    HealthWaiter, MetabaseConfig, SourceTarget, SyncConfig, SyncFailure, SyncJobRunner,
    SyncOutcome, SyncProgress, resync_dashboards,
};
use tracing::debug;

use crate::cli::{Cli, Command, GlobalArgs};
use crate::display::{Emoji, display, error_log, terminal_link};
use crate::error::CliResult;
use crate::prompts::PromptProvider;
use crate::providers::ProviderClient;

/// Everything a command needs for one invocation.
pub struct Context<'a> {
    pub config: SyncConfig,
    pub client: AirbyteClient,
    pub metabase: MetabaseConfig,
    pub providers: ProviderClient,
    pub prompts: &'a dyn PromptProvider,
    pub progress: &'a dyn SyncProgress,
}

impl<'a> Context<'a> {
    /// `config` supplies the retry and polling settings; the URLs come from `global`.
    pub fn new(
        global: &GlobalArgs,
        config: SyncConfig,
        prompts: &'a dyn PromptProvider,
        progress: &'a dyn SyncProgress,
    ) -> CliResult<Self> {
        let config = config.with_airbyte_url(&global.airbyte_url);
        let client = AirbyteClient::new(&config)?;
        let providers = ProviderClient::new(global.provider_url.clone(), config.request_timeout)?;
        Ok(Self {
            client,
            metabase: MetabaseConfig {
                request_timeout: config.request_timeout,
                ..global.metabase_config()
            },
            providers,
            prompts,
            progress,
            config,
        })
    }

    pub fn runner(&self) -> SyncJobRunner<'_> {
        SyncJobRunner::from_config(&self.client, &self.config).with_progress(self.progress)
    }

    pub async fn wait_until_healthy(&self) -> CliResult<()> {
        display(format!("Checking connection with Airbyte {}", Emoji::CheckConnection));
        HealthWaiter::new(self.config.health_retry)
            .wait_until_healthy(self.client.api())
            .await?;
        Ok(())
    }
}

/// Run the parsed command.
pub async fn run(cli: Cli, ctx: &Context<'_>) -> CliResult<()> {
    match cli.command.unwrap_or(Command::PickSource) {
        Command::Github(args) => github::run(ctx, args).await.map(drop),
        Command::Gitlab(args) => gitlab::run(ctx, args).await.map(drop),
        Command::Bitbucket(args) => bitbucket::run(ctx, args).await.map(drop),
        Command::Jira(args) => jira::run(ctx, args).await.map(drop),
        Command::FarosGithub(args) => faros_github::run(ctx, args).await.map(drop),
        Command::RefreshSources => refresh::run(ctx).await.map(drop),
        Command::PickSource => pick::run(ctx).await.map(drop),
    }
}

/// Upsert the connector's source, sync its connection and report the outcome.
///
/// Setup errors are returned. A sync that runs and fails is reported and
/// returned as [`SyncOutcome::Failed`], not as an error.
pub async fn setup_and_sync(ctx: &Context<'_>, settings: &ConnectorSettings) -> CliResult<SyncOutcome> {
    let kind = settings.kind();
    let registry = ConnectorRegistry::new(&ctx.client);

    display(format!("Setting up source {}", Emoji::Setup));
    let target = resolve_target(&registry, kind).await?;
    let descriptor = settings.descriptor(target, Utc::now());
    ConnectorConfigurator::new(&ctx.client)
        .upsert_source(&descriptor)
        .await?;
    display(format!("Setup succeeded {}", Emoji::Success));

    let connection_id = registry
        .find_connection_id_by_name(&kind.connection_name())
        .await?;

    display(format!("Syncing {}", Emoji::Sync));
    let outcome = ctx.runner().run_and_track(&connection_id).await;
    report(&outcome);

    if outcome.is_success() {
        resync_dashboards(&ctx.metabase).await;
    }
    Ok(outcome)
}

/// The existing source with the connector's name, or a new one from its definition.
async fn resolve_target(registry: &ConnectorRegistry<'_>, kind: ConnectorKind) -> CliResult<SourceTarget> {
    match registry.find_source_id_by_name(kind.source_name()).await {
        Ok(source_id) => Ok(SourceTarget::Existing(source_id)),
        Err(e) if e.is_not_found() => {
            debug!(connector = %kind, "No source yet, creating one");
            let workspace_id = registry.get_single_workspace().await?;
            let source_definition_id = registry
                .find_source_definition_id_by_name(kind.source_definition_name())
                .await?;
            Ok(SourceTarget::New {
                workspace_id,
                source_definition_id,
            })
        }
        Err(e) => Err(e.into()),
    }
}

pub fn report(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Succeeded { .. } => display(format!("Syncing succeeded {}", Emoji::Success)),
        SyncOutcome::Failed(failure) => error_log(failure_message(failure)),
    }
}

/// `"Sync <reason>. Please check the logs"` with a link to the connection's status page.
pub fn failure_message(failure: &SyncFailure) -> String {
    format!(
        "Sync {}. {} Please check the {}",
        failure.reason,
        Emoji::Failure,
        terminal_link("logs", &failure.logs_url)
    )
}

/// Items from flags, or chosen interactively from what the provider lists.
///
/// The user may pick from the provider's list or type the names. An empty
/// result means nothing was chosen.
pub async fn choose_items<F, Fut>(
    prompts: &dyn PromptProvider,
    noun: &str,
    manual_hint: &str,
    fetch: F,
) -> CliResult<Vec<String>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = CliResult<Vec<String>>>,
{
    let choices = [
        format!("Select from a list of {} your token has access to", noun),
        "I'll enter them manually".to_string(),
    ];
    let how = prompts.select(&format!("How would you like to select your {}?", noun), &choices)?;

    if how == 1 {
        return prompts.list(&format!(
            "Enter your favorite {} (comma-separated). E.g., {}",
            noun, manual_hint
        ));
    }

    let available = fetch().await?;
    if available.is_empty() {
        display(format!("No {} found", noun));
        return Ok(Vec::new());
    }
    let picked = prompts.multi_select(
        &format!("Pick your favorite {} with SPACEBAR; press ENTER when done", noun),
        &available,
    )?;
    Ok(picked
        .into_iter()
        .filter_map(|index| available.get(index).cloned())
        .collect())
}

/// Value from flags, or prompted for.
pub fn or_prompt(value: Option<String>, prompt: impl FnOnce() -> CliResult<String>) -> CliResult<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(),
    }
}

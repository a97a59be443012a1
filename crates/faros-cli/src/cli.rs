// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use faros_sync::{DEFAULT_AIRBYTE_URL, DEFAULT_CUTOFF_DAYS, MetabaseConfig};

use crate::prompts::parse_list;

/// faros - set up and sync Faros CE data sources
#[derive(Debug, Parser)]
#[command(name = "faros")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `pick-source`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Airbyte URL
    #[arg(long, global = true, env = "FAROS_AIRBYTE_URL", default_value = DEFAULT_AIRBYTE_URL)]
    pub airbyte_url: String,

    /// Metabase URL
    #[arg(long, global = true, env = "METABASE_URL", default_value = "http://localhost:3000")]
    pub metabase_url: String,

    /// Metabase username
    #[arg(long, global = true, env = "METABASE_USERNAME", default_value = "admin@admin.com")]
    pub metabase_username: String,

    /// Metabase password
    #[arg(
        long,
        global = true,
        env = "METABASE_PASSWORD",
        default_value = "admin",
        hide_env_values = true
    )]
    pub metabase_password: String,

    /// Base URL replacing every provider API (self-hosted instances)
    #[arg(long, global = true, env = "FAROS_PROVIDER_URL", hide = true)]
    pub provider_url: Option<String>,
}

impl GlobalArgs {
    pub fn metabase_config(&self) -> MetabaseConfig {
        MetabaseConfig {
            url: self.metabase_url.clone(),
            username: self.metabase_username.clone(),
            password: self.metabase_password.clone(),
            ..MetabaseConfig::default()
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Set up and sync GitHub
    Github(GithubArgs),

    /// Set up and sync GitLab
    Gitlab(GitlabArgs),

    /// Set up and sync Bitbucket
    Bitbucket(BitbucketArgs),

    /// Set up and sync Jira
    Jira(JiraArgs),

    /// Set up and sync GitHub through the Faros GitHub connector
    FarosGithub(FarosGithubArgs),

    /// Re-sync every source whose last sync succeeded
    RefreshSources,

    /// Choose a source to set up
    PickSource,
}

/// A comma-separated list argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvList(pub Vec<String>);

fn parse_csv(raw: &str) -> Result<CsvList, String> {
    Ok(CsvList(parse_list(raw)))
}

fn cutoff_days() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..)
}

fn app_id() -> clap::builder::RangedU64ValueParser<u64> {
    clap::value_parser!(u64).range(1..)
}

#[derive(Debug, Clone, Args)]
pub struct GithubArgs {
    /// Personal Access Token
    #[arg(long)]
    pub token: Option<String>,

    /// Comma-separated list of repos to sync
    #[arg(long, value_parser = parse_csv)]
    pub repo_list: Option<CsvList>,

    /// Fetch data from the last N days
    #[arg(long, default_value_t = DEFAULT_CUTOFF_DAYS, value_parser = cutoff_days())]
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct GitlabArgs {
    /// API URL, e.g. gitlab.com
    #[arg(long)]
    pub api_url: Option<String>,

    /// Personal Access Token
    #[arg(long)]
    pub token: Option<String>,

    /// Comma-separated list of projects to sync
    #[arg(long, value_parser = parse_csv)]
    pub project_list: Option<CsvList>,

    /// Fetch data from the last N days
    #[arg(long, default_value_t = DEFAULT_CUTOFF_DAYS, value_parser = cutoff_days())]
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct BitbucketArgs {
    /// Username
    #[arg(long)]
    pub username: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,

    /// Personal Access Token
    #[arg(long, conflicts_with_all = ["username", "password"])]
    pub token: Option<String>,

    /// Workspace
    #[arg(long)]
    pub workspace: Option<String>,

    /// Comma-separated list of repos to sync
    #[arg(long, value_parser = parse_csv)]
    pub repo_list: Option<CsvList>,

    /// Fetch data from the last N days
    #[arg(long, default_value_t = DEFAULT_CUTOFF_DAYS, value_parser = cutoff_days())]
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct JiraArgs {
    /// Email
    #[arg(long)]
    pub email: Option<String>,

    /// Personal Access Token
    #[arg(long)]
    pub token: Option<String>,

    /// Domain, e.g. foobar.atlassian.net
    #[arg(long)]
    pub domain: Option<String>,

    /// Comma-separated list of project keys to sync
    #[arg(long, value_parser = parse_csv)]
    pub project_list: Option<CsvList>,

    /// Fetch data from the last N days
    #[arg(long, default_value_t = DEFAULT_CUTOFF_DAYS, value_parser = cutoff_days())]
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct FarosGithubArgs {
    /// GitHub URL
    #[arg(long)]
    pub url: Option<String>,

    /// GitHub Personal Access Token
    #[arg(long)]
    pub personal_access_token: Option<String>,

    /// GitHub App ID
    #[arg(long, value_parser = app_id())]
    pub app_id: Option<u64>,

    /// GitHub App Private Key
    #[arg(long)]
    pub private_key: Option<String>,

    /// Comma-separated list of organizations to sync
    #[arg(long, value_parser = parse_csv)]
    pub organizations: Option<CsvList>,

    /// Comma-separated list of organizations to exclude from sync
    #[arg(long, value_parser = parse_csv)]
    pub excluded_organizations: Option<CsvList>,

    /// Comma-separated list of repositories to sync
    #[arg(long, value_parser = parse_csv)]
    pub repositories: Option<CsvList>,

    /// Comma-separated list of repositories to exclude from sync
    #[arg(long, value_parser = parse_csv)]
    pub excluded_repositories: Option<CsvList>,

    /// Only fetch commits, issues and pull requests updated in the last N days
    #[arg(long, default_value_t = DEFAULT_CUTOFF_DAYS, value_parser = cutoff_days())]
    pub cutoff_days: u32,
}

impl Default for GithubArgs {
    fn default() -> Self {
        Self {
            token: None,
            repo_list: None,
            cutoff_days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

impl Default for GitlabArgs {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            project_list: None,
            cutoff_days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

impl Default for BitbucketArgs {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            token: None,
            workspace: None,
            repo_list: None,
            cutoff_days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

impl Default for JiraArgs {
    fn default() -> Self {
        Self {
            email: None,
            token: None,
            domain: None,
            project_list: None,
            cutoff_days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

impl Default for FarosGithubArgs {
    fn default() -> Self {
        Self {
            url: None,
            personal_access_token: None,
            app_id: None,
            private_key: None,
            organizations: None,
            excluded_organizations: None,
            repositories: None,
            excluded_repositories: None,
            cutoff_days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

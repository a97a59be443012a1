// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Supported connector kinds and their source configuration builders.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use crate::error::SyncError;
use crate::types::{SourceDescriptor, SourceTarget};

/// Name of the destination every connection writes to.
pub const DESTINATION_NAME: &str = "Faros";

/// Default window of history to fetch.
pub const DEFAULT_CUTOFF_DAYS: u32 = 30;

/// Connector kinds this toolkit can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    GitHub,
    GitLab,
    Bitbucket,
    Jira,
    /// Faros' own GitHub connector, with organization filters and app auth.
    FarosGitHub,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 5] = [
        ConnectorKind::GitHub,
        ConnectorKind::GitLab,
        ConnectorKind::Bitbucket,
        ConnectorKind::Jira,
        ConnectorKind::FarosGitHub,
    ];

    /// Human-readable provider name, also used as the source name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
            Self::Bitbucket => "Bitbucket",
            Self::Jira => "Jira",
            Self::FarosGitHub => "Faros GitHub",
        }
    }

    /// Name of the source in the sync engine.
    pub fn source_name(&self) -> &'static str {
        self.display_name()
    }

    /// Name of the connector definition installed in the sync engine.
    pub fn source_definition_name(&self) -> &'static str {
        self.display_name()
    }

    /// Name of the connection, `"<Provider> - <Destination>"`.
    pub fn connection_name(&self) -> String {
        let provider = match self {
            Self::FarosGitHub => "FarosGitHub",
            _ => self.display_name(),
        };
        format!("{} - {}", provider, DESTINATION_NAME)
    }

    /// Subcommand name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Jira => "jira",
            Self::FarosGitHub => "faros-github",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ConnectorKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SyncError::Config(format!("unknown connector: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    pub token: String,
    pub repositories: Vec<String>,
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLabSettings {
    /// Host name, e.g. `gitlab.com`.
    pub api_url: String,
    pub token: String,
    pub projects: Vec<String>,
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitbucketAuth {
    Password { username: String, password: String },
    Token(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbucketSettings {
    pub auth: BitbucketAuth,
    pub workspace: String,
    pub repositories: Vec<String>,
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    pub email: String,
    pub token: String,
    /// Site domain, e.g. `foobar.atlassian.net`.
    pub domain: String,
    pub projects: Vec<String>,
    pub cutoff_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubAuth {
    Token(String),
    App { app_id: u64, private_key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarosGitHubSettings {
    /// API URL for GitHub Enterprise; the connector's default otherwise.
    pub url: Option<String>,
    pub auth: GitHubAuth,
    pub organizations: Vec<String>,
    pub excluded_organizations: Vec<String>,
    pub repositories: Vec<String>,
    pub excluded_repositories: Vec<String>,
    pub cutoff_days: u32,
}

/// Provider-specific settings, one variant per [`ConnectorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorSettings {
    GitHub(GitHubSettings),
    GitLab(GitLabSettings),
    Bitbucket(BitbucketSettings),
    Jira(JiraSettings),
    FarosGitHub(FarosGitHubSettings),
}

impl ConnectorSettings {
    pub fn kind(&self) -> ConnectorKind {
        match self {
            Self::GitHub(_) => ConnectorKind::GitHub,
            Self::GitLab(_) => ConnectorKind::GitLab,
            Self::Bitbucket(_) => ConnectorKind::Bitbucket,
            Self::Jira(_) => ConnectorKind::Jira,
            Self::FarosGitHub(_) => ConnectorKind::FarosGitHub,
        }
    }

    /// The `connectionConfiguration` blob for the sync engine.
    pub fn connection_configuration(&self, now: DateTime<Utc>) -> Value {
        match self {
            Self::GitHub(s) => json!({
                "repository": s.repositories.join(" "),
                "start_date": start_date(now, s.cutoff_days),
                "credentials": {
                    "option_title": "PAT Credentials",
                    "personal_access_token": s.token,
                },
                "page_size_for_large_streams": 10,
            }),
            Self::GitLab(s) => json!({
                "api_url": s.api_url,
                "projects": s.projects.join(" "),
                "start_date": start_date(now, s.cutoff_days),
                "private_token": s.token,
            }),
            Self::Bitbucket(s) => {
                let mut config = json!({
                    "workspaces": [s.workspace],
                    "repositories": s.repositories,
                    "cutoff_days": s.cutoff_days,
                    "pagelen": 10,
                });
                match &s.auth {
                    BitbucketAuth::Password { username, password } => {
                        config["username"] = json!(username);
                        config["password"] = json!(password);
                    }
                    BitbucketAuth::Token(token) => {
                        config["token"] = json!(token);
                    }
                }
                config
            }
            Self::Jira(s) => json!({
                "email": s.email,
                "api_token": s.token,
                "domain": s.domain,
                "projects": s.projects,
                "start_date": start_date(now, s.cutoff_days),
                "enable_experimental_streams": true,
                "expand_issue_changelog": true,
            }),
            Self::FarosGitHub(s) => {
                let authentication = match &s.auth {
                    GitHubAuth::Token(token) => json!({
                        "type": "token",
                        "personal_access_token": token,
                    }),
                    GitHubAuth::App {
                        app_id,
                        private_key,
                    } => json!({
                        "type": "app",
                        "app_id": app_id,
                        "private_key": private_key,
                    }),
                };
                let mut config = json!({
                    "authentication": authentication,
                    "cutoff_days": s.cutoff_days,
                });
                if let Some(url) = &s.url {
                    config["url"] = json!(url);
                }
                // Unset filters are left out so the connector applies none.
                for (key, values) in [
                    ("organizations", &s.organizations),
                    ("excluded_organizations", &s.excluded_organizations),
                    ("repositories", &s.repositories),
                    ("excluded_repositories", &s.excluded_repositories),
                ] {
                    if !values.is_empty() {
                        config[key] = json!(values);
                    }
                }
                config
            }
        }
    }

    /// Build the descriptor submitted to the configurator.
    pub fn descriptor(&self, target: SourceTarget, now: DateTime<Utc>) -> SourceDescriptor {
        SourceDescriptor::new(
            self.kind().source_name(),
            target,
            self.connection_configuration(now),
        )
    }
}

/// `now - cutoff_days` as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn start_date(now: DateTime<Utc>, cutoff_days: u32) -> String {
    (now - Duration::days(i64::from(cutoff_days)))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Listing the repositories and projects a token can see, for interactive selection.

use std::time::Duration;

use faros_sync::{ApiError, BitbucketAuth};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CliError, CliResult};

const GITHUB_API_URL: &str = "https://api.github.com";
const BITBUCKET_API_URL: &str = "https://api.bitbucket.org";
const USER_AGENT: &str = concat!("faros-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct GitLabProject {
    path_with_namespace: String,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct BitbucketWorkspace {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct BitbucketRepo {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct JiraProject {
    key: String,
}

/// Read-only client for the providers' own APIs.
///
/// `base_override` replaces every provider's base URL, for self-hosted
/// instances and tests.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_override: Option<String>,
}

impl ProviderClient {
    pub fn new(base_override: Option<String>, timeout: Duration) -> CliResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError::Validation(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_override: base_override.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    fn base(&self, default: String) -> String {
        self.base_override.clone().unwrap_or(default)
    }

    /// `owner/name` of every repository the token can access.
    pub async fn github_repos(&self, token: &str) -> CliResult<Vec<String>> {
        let url = format!("{}/user/repos", self.base(GITHUB_API_URL.to_string()));
        let repos: Vec<GitHubRepo> = fetch(
            self.http.get(url).bearer_auth(token),
            "Failed to get repos",
        )
        .await?;
        Ok(repos.into_iter().map(|repo| repo.full_name).collect())
    }

    /// `group/project` of every project the token is a member of.
    pub async fn gitlab_projects(&self, api_url: &str, token: &str) -> CliResult<Vec<String>> {
        let url = format!("{}/api/v4/projects", self.base(format!("https://{}", api_url)));
        let projects: Vec<GitLabProject> = fetch(
            self.http
                .get(url)
                .query(&[("membership", "true")])
                .header("PRIVATE-TOKEN", token),
            "Failed to get projects",
        )
        .await?;
        Ok(projects
            .into_iter()
            .map(|project| project.path_with_namespace)
            .collect())
    }

    pub async fn bitbucket_workspaces(&self, auth: &BitbucketAuth) -> CliResult<Vec<String>> {
        let url = format!("{}/2.0/workspaces", self.base(BITBUCKET_API_URL.to_string()));
        let page: Page<BitbucketWorkspace> =
            fetch(bitbucket_auth(self.http.get(url), auth), "Failed to get workspaces").await?;
        Ok(page.values.into_iter().map(|ws| ws.slug).collect())
    }

    pub async fn bitbucket_repos(
        &self,
        auth: &BitbucketAuth,
        workspace: &str,
    ) -> CliResult<Vec<String>> {
        let url = format!(
            "{}/2.0/repositories/{}",
            self.base(BITBUCKET_API_URL.to_string()),
            workspace
        );
        let page: Page<BitbucketRepo> =
            fetch(bitbucket_auth(self.http.get(url), auth), "Failed to get repos").await?;
        Ok(page.values.into_iter().map(|repo| repo.full_name).collect())
    }

    /// Keys of every project visible to the account.
    pub async fn jira_projects(&self, domain: &str, email: &str, token: &str) -> CliResult<Vec<String>> {
        let url = format!("{}/rest/api/3/project", self.base(format!("https://{}", domain)));
        let projects: Vec<JiraProject> = fetch(
            self.http.get(url).basic_auth(email, Some(token)),
            "Failed to get projects",
        )
        .await?;
        Ok(projects.into_iter().map(|project| project.key).collect())
    }
}

fn bitbucket_auth(request: RequestBuilder, auth: &BitbucketAuth) -> RequestBuilder {
    match auth {
        BitbucketAuth::Password { username, password } => {
            request.basic_auth(username, Some(password))
        }
        BitbucketAuth::Token(token) => request.bearer_auth(token),
    }
}

async fn fetch<T: DeserializeOwned>(request: RequestBuilder, context: &str) -> CliResult<T> {
    let wrap = |cause: String| CliError::Provider(ApiError::new(context, cause));

    let response = request
        .send()
        .await
        .map_err(|e| wrap(e.without_url().to_string()))?;
    let status = response.status();
    debug!(status = %status, "Provider responded");
    if !status.is_success() {
        return Err(wrap(format!("request failed with status {}", status)));
    }
    response
        .json()
        .await
        .map_err(|e| wrap(format!("malformed response body: {}", e.without_url())))
}

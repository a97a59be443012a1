// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Name-based lookup of the opaque IDs the sync engine assigns.
//!
//! Nothing is cached: every call lists the collection again, since names can
//! be reassigned between runs and the sync engine is the source of truth.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::airbyte::AirbyteClient;
use crate::error::{Result, SyncError, WorkspaceError};
use crate::types::{
    ConnectionId, ConnectionSummary, JobStatus, Named, SourceDefinitionId,
    SourceDefinitionSummary, SourceId, SourceSummary, Workspace, WorkspaceId,
};

#[derive(Debug, Deserialize)]
struct WorkspaceList {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

#[derive(Debug, Deserialize)]
struct SourceList {
    #[serde(default)]
    sources: Vec<SourceSummary>,
}

#[derive(Debug, Deserialize)]
struct ConnectionList {
    #[serde(default)]
    connections: Vec<ConnectionSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceDefinitionList {
    #[serde(default)]
    source_definitions: Vec<SourceDefinitionSummary>,
}

#[derive(Debug, Deserialize)]
struct JobList {
    #[serde(default)]
    jobs: Vec<JobWithAttempts>,
}

#[derive(Debug, Deserialize)]
struct JobWithAttempts {
    job: JobRead,
}

#[derive(Debug, Deserialize)]
struct JobRead {
    status: JobStatus,
}

/// Resolves human-readable names to sync engine identifiers.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorRegistry<'a> {
    client: &'a AirbyteClient,
}

impl<'a> ConnectorRegistry<'a> {
    pub fn new(client: &'a AirbyteClient) -> Self {
        Self { client }
    }

    /// List all workspaces.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let list: WorkspaceList = self
            .client
            .api()
            .post("/workspaces/list", &json!({}), "failed to list workspaces")
            .await?;
        Ok(list.workspaces)
    }

    /// The one workspace the sync engine is expected to hold.
    #[instrument(skip(self))]
    pub async fn get_single_workspace(&self) -> Result<WorkspaceId> {
        let workspaces = self.list_workspaces().await?;
        let workspace = single_workspace(workspaces)?;
        debug!(workspace_id = %workspace.workspace_id, "Resolved workspace");
        Ok(workspace.workspace_id)
    }

    /// List the sources of a workspace.
    pub async fn list_sources(&self, workspace_id: &str) -> Result<Vec<SourceSummary>> {
        let list: SourceList = self
            .client
            .api()
            .post(
                "/sources/list",
                &json!({ "workspaceId": workspace_id }),
                "failed to list sources",
            )
            .await?;
        Ok(list.sources)
    }

    /// List the connections of a workspace.
    pub async fn list_connections(&self, workspace_id: &str) -> Result<Vec<ConnectionSummary>> {
        let list: ConnectionList = self
            .client
            .api()
            .post(
                "/connections/list",
                &json!({ "workspaceId": workspace_id }),
                "failed to list connections",
            )
            .await?;
        Ok(list.connections)
    }

    /// ID of the source named exactly `name`.
    #[instrument(skip(self))]
    pub async fn find_source_id_by_name(&self, name: &str) -> Result<SourceId> {
        let workspace_id = self.get_single_workspace().await?;
        let sources = self.list_sources(&workspace_id).await?;
        find_by_name(sources, name)
            .map(|source| source.source_id)
            .ok_or_else(|| SyncError::not_found("source", name))
    }

    /// ID of the connection named exactly `name`.
    #[instrument(skip(self))]
    pub async fn find_connection_id_by_name(&self, name: &str) -> Result<ConnectionId> {
        let workspace_id = self.get_single_workspace().await?;
        let connections = self.list_connections(&workspace_id).await?;
        find_by_name(connections, name)
            .map(|connection| connection.connection_id)
            .ok_or_else(|| SyncError::not_found("connection", name))
    }

    /// ID of the installed connector definition named exactly `name`.
    #[instrument(skip(self))]
    pub async fn find_source_definition_id_by_name(&self, name: &str) -> Result<SourceDefinitionId> {
        let workspace_id = self.get_single_workspace().await?;
        let list: SourceDefinitionList = self
            .client
            .api()
            .post(
                "/source_definitions/list",
                &json!({ "workspaceId": workspace_id }),
                "failed to list source definitions",
            )
            .await?;
        find_by_name(list.source_definitions, name)
            .map(|definition| definition.source_definition_id)
            .ok_or_else(|| SyncError::not_found("source definition", name))
    }

    /// Status of the most recent sync job of a connection, if any ran.
    pub async fn latest_sync_status(&self, connection_id: &str) -> Result<Option<JobStatus>> {
        let list: JobList = self
            .client
            .api()
            .post(
                "/jobs/list",
                &json!({ "configTypes": ["sync"], "configId": connection_id }),
                "failed to list jobs",
            )
            .await?;
        Ok(list.jobs.into_iter().next().map(|entry| entry.job.status))
    }

    /// The connection's ID when its most recent sync succeeded.
    ///
    /// `Ok(None)` covers both "never synced" and "last sync did not succeed".
    #[instrument(skip(self))]
    pub async fn active_connection_id(&self, connection_name: &str) -> Result<Option<ConnectionId>> {
        let connection_id = self.find_connection_id_by_name(connection_name).await?;
        let status = self.latest_sync_status(&connection_id).await?;
        debug!(connection_id = %connection_id, status = ?status, "Latest sync status");
        Ok(status
            .filter(JobStatus::is_success)
            .map(|_| connection_id))
    }

    /// Whether the named connection's most recent sync succeeded.
    pub async fn is_connection_active(&self, connection_name: &str) -> Result<bool> {
        Ok(self.active_connection_id(connection_name).await?.is_some())
    }
}

fn single_workspace(mut workspaces: Vec<Workspace>) -> std::result::Result<Workspace, WorkspaceError> {
    match workspaces.len() {
        0 => Err(WorkspaceError::NoneFound),
        1 => Ok(workspaces.remove(0)),
        n => Err(WorkspaceError::Ambiguous(n)),
    }
}

/// First item whose name equals `name` exactly.
fn find_by_name<T: Named>(items: Vec<T>, name: &str) -> Option<T> {
    items.into_iter().find(|item| item.name() == name)
}

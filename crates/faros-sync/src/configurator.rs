// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Two-phase (validate, then commit) source configuration.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::airbyte::AirbyteClient;
use crate::error::{ApiError, Result};
use crate::types::{SourceDescriptor, SourceId, SourceTarget};

#[derive(Debug, Deserialize)]
struct CheckConnectionRead {
    status: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceRead {
    source_id: SourceId,
}

/// Creates or updates a named source.
///
/// Validation failures are configuration problems for a human to fix and are
/// never retried.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorConfigurator<'a> {
    client: &'a AirbyteClient,
}

impl<'a> ConnectorConfigurator<'a> {
    pub fn new(client: &'a AirbyteClient) -> Self {
        Self { client }
    }

    /// Validate the descriptor, then commit it. Returns the source ID.
    ///
    /// Exactly two round trips. If validation fails nothing is persisted.
    #[instrument(skip(self, descriptor), fields(name = %descriptor.name))]
    pub async fn upsert_source(&self, descriptor: &SourceDescriptor) -> Result<SourceId> {
        let api = self.client.api();

        match &descriptor.target {
            SourceTarget::Existing(source_id) => {
                let body = json!({
                    "sourceId": source_id,
                    "name": descriptor.name,
                    "connectionConfiguration": descriptor.connection_configuration,
                });

                let check: CheckConnectionRead = api
                    .post(
                        "/sources/check_connection_for_update",
                        &body,
                        "source validation failed",
                    )
                    .await?;
                ensure_check_succeeded(check)?;

                let _: Value = api
                    .post("/sources/update", &body, "failed to update source")
                    .await?;

                info!(source_id = %source_id, "Source updated");
                Ok(source_id.clone())
            }
            SourceTarget::New {
                workspace_id,
                source_definition_id,
            } => {
                let check: CheckConnectionRead = api
                    .post(
                        "/scheduler/sources/check_connection",
                        &json!({
                            "sourceDefinitionId": source_definition_id,
                            "connectionConfiguration": descriptor.connection_configuration,
                        }),
                        "source validation failed",
                    )
                    .await?;
                ensure_check_succeeded(check)?;

                let created: SourceRead = api
                    .post(
                        "/sources/create",
                        &json!({
                            "sourceDefinitionId": source_definition_id,
                            "workspaceId": workspace_id,
                            "name": descriptor.name,
                            "connectionConfiguration": descriptor.connection_configuration,
                        }),
                        "failed to create source",
                    )
                    .await?;

                info!(source_id = %created.source_id, "Source created");
                Ok(created.source_id)
            }
        }
    }
}

/// An explicit non-`succeeded` status rejects the configuration.
fn ensure_check_succeeded(check: CheckConnectionRead) -> std::result::Result<(), ApiError> {
    match check.status.as_deref() {
        None | Some("succeeded") => Ok(()),
        Some(status) => Err(ApiError::new(
            "source validation failed",
            check
                .message
                .unwrap_or_else(|| format!("connection check {}", status)),
        )),
    }
}

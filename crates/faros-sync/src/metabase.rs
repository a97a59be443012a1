// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Best-effort schema re-sync in the BI engine after data lands.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::client::ServiceClient;
use crate::config::normalize_url;
use crate::error::Result;

/// Connection settings for the BI engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetabaseConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Database holding the synced data.
    pub database_id: u32,
    pub request_timeout: Duration,
}

impl Default for MetabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            username: "admin@admin.com".to_string(),
            password: "admin".to_string(),
            database_id: 2,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Session {
    id: String,
}

/// Authenticated BI engine client.
#[derive(Debug, Clone)]
pub struct MetabaseClient {
    api: ServiceClient,
}

impl MetabaseClient {
    /// Open a session and return a client that sends it on every request.
    #[instrument(skip(config), fields(url = %config.url))]
    pub async fn connect(config: &MetabaseConfig) -> Result<Self> {
        let base = format!("{}/api", normalize_url(&config.url));
        let anonymous = ServiceClient::new(&base, config.request_timeout)?;

        let session: Session = anonymous
            .post(
                "/session",
                &json!({ "username": config.username, "password": config.password }),
                "failed to get session token",
            )
            .await?;
        debug!("Obtained BI session");

        let api = ServiceClient::new(&base, config.request_timeout)?
            .with_header("x-metabase-session", &session.id)?;
        Ok(Self { api })
    }

    /// Ask the BI engine to rescan the schema (and field values) of a database.
    pub async fn force_sync(&self, database_id: u32) -> Result<()> {
        let _: Value = self
            .api
            .post(
                &format!("/database/{}/sync_schema", database_id),
                &json!({}),
                "unable to trigger rescan",
            )
            .await?;
        Ok(())
    }
}

/// Trigger a schema re-sync, logging and discarding any failure.
///
/// Never affects the caller's result: periodic scans in the BI engine catch
/// up eventually.
pub async fn resync_dashboards(config: &MetabaseConfig) {
    let result = async {
        let client = MetabaseClient::connect(config).await?;
        client.force_sync(config.database_id).await
    }
    .await;

    match result {
        Ok(()) => debug!(database_id = config.database_id, "BI schema re-sync triggered"),
        Err(e) => warn!(error = %e, "BI schema re-sync failed, ignoring"),
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Binding of [`ServiceClient`] to the sync engine's `/api/v1` API.

use crate::client::ServiceClient;
use crate::config::{SyncConfig, normalize_url};
use crate::error::Result;

/// Handle on one sync engine instance.
///
/// Holds no remote state; components borrow it for the duration of a command.
#[derive(Debug, Clone)]
pub struct AirbyteClient {
    api: ServiceClient,
    airbyte_url: String,
}

impl AirbyteClient {
    /// Create a client from the given configuration.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let airbyte_url = normalize_url(&config.airbyte_url);
        let api = ServiceClient::new(format!("{}/api/v1", airbyte_url), config.request_timeout)?;
        Ok(Self { api, airbyte_url })
    }

    /// Create a client for `url` with default settings.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self> {
        Self::new(&SyncConfig::default().with_airbyte_url(url))
    }

    /// The underlying `/api/v1` client.
    pub fn api(&self) -> &ServiceClient {
        &self.api
    }

    /// The sync engine base URL.
    pub fn airbyte_url(&self) -> &str {
        &self.airbyte_url
    }

    /// Link to a connection's status page, where job logs live.
    pub fn connection_status_url(&self, connection_id: &str) -> String {
        format!("{}/connections/{}/status", self.airbyte_url, connection_id)
    }
}

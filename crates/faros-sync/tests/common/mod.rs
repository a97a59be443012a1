// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared helpers for the mock sync engine tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use faros_sync::{AirbyteClient, RetryPolicy, SyncConfig, SyncOutcome, SyncProgress};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Replies with each template in turn, repeating the last one forever.
pub struct SequenceResponder {
    responses: Vec<ResponseTemplate>,
    calls: AtomicUsize,
}

impl SequenceResponder {
    pub fn new(responses: Vec<ResponseTemplate>) -> Self {
        assert!(!responses.is_empty());
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    /// One `jobs/get` reply per status.
    pub fn job_statuses(statuses: &[&str]) -> Self {
        Self::new(statuses.iter().map(|s| job_response(1, s)).collect())
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}

/// Counts ticks and finishes, remembering the last outcome.
#[derive(Default)]
pub struct RecordingProgress {
    pub ticks: AtomicUsize,
    pub finishes: AtomicUsize,
    pub finished: Mutex<Option<SyncOutcome>>,
}

impl SyncProgress for RecordingProgress {
    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self, outcome: &SyncOutcome) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
        *self.finished.lock().unwrap() = Some(outcome.clone());
    }
}

/// Configuration pointing at the mock server with millisecond delays.
pub fn fast_config(server: &MockServer) -> SyncConfig {
    SyncConfig::new()
        .with_airbyte_url(server.uri())
        .with_health_retry(RetryPolicy::new(5, Duration::from_millis(10)))
        .with_poll_interval(Duration::from_millis(5))
        .with_request_timeout(Duration::from_secs(5))
}

pub async fn setup() -> (MockServer, AirbyteClient, SyncConfig) {
    let server = MockServer::start().await;
    let config = fast_config(&server);
    let client = AirbyteClient::new(&config).unwrap();
    (server, client, config)
}

pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn job_response(id: i64, status: &str) -> ResponseTemplate {
    json_response(json!({ "job": { "id": id, "status": status } }))
}

pub async fn mount_workspaces(server: &MockServer, ids: &[&str]) {
    let workspaces: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "workspaceId": id, "initialSetupComplete": true }))
        .collect();
    Mock::given(method("POST"))
        .and(path("/api/v1/workspaces/list"))
        .respond_with(json_response(json!({ "workspaces": workspaces })))
        .mount(server)
        .await;
}

pub async fn mount_sources(server: &MockServer, sources: &[(&str, &str)]) {
    let sources: Vec<Value> = sources
        .iter()
        .map(|(id, name)| json!({ "sourceId": id, "name": name }))
        .collect();
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/list"))
        .respond_with(json_response(json!({ "sources": sources })))
        .mount(server)
        .await;
}

pub async fn mount_connections(server: &MockServer, connections: &[(&str, &str)]) {
    let connections: Vec<Value> = connections
        .iter()
        .map(|(id, name)| json!({ "connectionId": id, "name": name }))
        .collect();
    Mock::given(method("POST"))
        .and(path("/api/v1/connections/list"))
        .respond_with(json_response(json!({ "connections": connections })))
        .mount(server)
        .await;
}

/// Latest sync job status of a connection; `None` means no jobs at all.
pub async fn mount_latest_job(server: &MockServer, connection_id: &str, status: Option<&str>) {
    let jobs = match status {
        Some(status) => json!([{ "job": { "id": 7, "status": status }, "attempts": [] }]),
        None => json!([]),
    };
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/list"))
        .and(body_partial_json(json!({ "configId": connection_id })))
        .respond_with(json_response(json!({ "jobs": jobs })))
        .mount(server)
        .await;
}

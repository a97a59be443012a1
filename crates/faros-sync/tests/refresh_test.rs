// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Refreshing every active connector against a mock sync engine.

mod common;

use std::sync::atomic::Ordering;

use common::{RecordingProgress, job_response, json_response, mount_connections, mount_latest_job, mount_workspaces, setup};
use faros_sync::{ConnectorKind, RefreshCoordinator, SyncJobRunner};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_sync(server: &MockServer, connection_id: &str, job_id: i64, final_status: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/connections/sync"))
        .and(body_partial_json(json!({ "connectionId": connection_id })))
        .respond_with(job_response(job_id, "running"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/get"))
        .and(body_partial_json(json!({ "id": job_id })))
        .respond_with(job_response(job_id, final_status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_runs_active_connectors_despite_one_error() {
    let (server, client, config) = setup().await;
    mount_workspaces(&server, &["ws-1"]).await;
    mount_connections(
        &server,
        &[
            ("conn-gh", "GitHub - Faros"),
            ("conn-gl", "GitLab - Faros"),
            ("conn-bb", "Bitbucket - Faros"),
            ("conn-jira", "Jira - Faros"),
        ],
    )
    .await;

    mount_latest_job(&server, "conn-gh", Some("succeeded")).await;
    mount_latest_job(&server, "conn-bb", Some("succeeded")).await;
    mount_latest_job(&server, "conn-jira", Some("failed")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/list"))
        .and(body_partial_json(json!({ "configId": "conn-gl" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    mount_sync(&server, "conn-gh", 1, "succeeded").await;
    mount_sync(&server, "conn-bb", 2, "failed").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/connections/sync"))
        .and(body_partial_json(json!({ "connectionId": "conn-jira" })))
        .respond_with(job_response(3, "running"))
        .expect(0)
        .mount(&server)
        .await;

    let progress = RecordingProgress::default();
    let runner = SyncJobRunner::from_config(&client, &config).with_progress(&progress);
    let report = RefreshCoordinator::new(&client, runner)
        .refresh_all(&ConnectorKind::ALL)
        .await;

    assert!(!report.nothing_to_refresh());
    assert!(report.any_succeeded());
    assert_eq!(
        report.skipped,
        vec![ConnectorKind::Jira, ConnectorKind::FarosGitHub]
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, ConnectorKind::GitLab);

    let refreshed: Vec<ConnectorKind> = report.refreshed.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(refreshed, vec![ConnectorKind::GitHub, ConnectorKind::Bitbucket]);
    assert!(report.refreshed[0].1.is_success());
    assert!(!report.refreshed[1].1.is_success());

    assert_eq!(
        report.failed_connectors(),
        vec![ConnectorKind::GitLab, ConnectorKind::Bitbucket]
    );

    // Both trackers tick the one sink; it is finished once, after the last.
    assert!(progress.ticks.load(Ordering::SeqCst) >= 2);
    assert_eq!(progress.finishes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_nothing_to_refresh() {
    let (server, client, config) = setup().await;
    mount_workspaces(&server, &["ws-1"]).await;
    mount_connections(&server, &[("conn-gh", "GitHub - Faros")]).await;
    mount_latest_job(&server, "conn-gh", None).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/connections/sync"))
        .respond_with(json_response(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let runner = SyncJobRunner::from_config(&client, &config);
    let report = RefreshCoordinator::new(&client, runner)
        .refresh_all(&ConnectorKind::ALL)
        .await;

    assert!(report.nothing_to_refresh());
    assert!(!report.any_succeeded());
    assert_eq!(report.skipped.len(), ConnectorKind::ALL.len());
    assert!(report.failed.is_empty());
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Validate-then-commit source upserts against a mock sync engine.

mod common;

use common::{json_response, setup};
use faros_sync::{ConnectorConfigurator, SourceDescriptor, SourceTarget, SyncError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn existing(source_id: &str) -> SourceDescriptor {
    SourceDescriptor::new(
        "GitHub",
        SourceTarget::Existing(source_id.to_string()),
        json!({ "repository": "acme/api" }),
    )
}

#[tokio::test]
async fn test_update_checks_then_commits_once_per_call() {
    let (server, client, _) = setup().await;
    let expected_body = json!({
        "sourceId": "src-1",
        "name": "GitHub",
        "connectionConfiguration": { "repository": "acme/api" },
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/sources/check_connection_for_update"))
        .and(body_json(expected_body.clone()))
        .respond_with(json_response(json!({ "status": "succeeded" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/update"))
        .and(body_json(expected_body))
        .respond_with(json_response(json!({ "sourceId": "src-1" })))
        .expect(2)
        .mount(&server)
        .await;

    let configurator = ConnectorConfigurator::new(&client);
    let descriptor = existing("src-1");
    assert_eq!(configurator.upsert_source(&descriptor).await.unwrap(), "src-1");
    assert_eq!(configurator.upsert_source(&descriptor).await.unwrap(), "src-1");
}

#[tokio::test]
async fn test_rejected_check_does_not_commit() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sources/check_connection_for_update"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/update"))
        .respond_with(json_response(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = ConnectorConfigurator::new(&client)
        .upsert_source(&existing("src-1"))
        .await
        .unwrap_err();
    match err {
        SyncError::Api(api) => assert_eq!(api.context(), "source validation failed"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_check_status_does_not_commit() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sources/check_connection_for_update"))
        .respond_with(json_response(
            json!({ "status": "failed", "message": "bad credentials" }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/update"))
        .respond_with(json_response(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = ConnectorConfigurator::new(&client)
        .upsert_source(&existing("src-1"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("bad credentials"));
}

#[tokio::test]
async fn test_commit_failure_surfaces() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sources/check_connection_for_update"))
        .respond_with(json_response(json!({ "status": "succeeded" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/update"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = ConnectorConfigurator::new(&client)
        .upsert_source(&existing("src-1"))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("failed to update source"));
}

#[tokio::test]
async fn test_create_new_source() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scheduler/sources/check_connection"))
        .and(body_json(json!({
            "sourceDefinitionId": "def-1",
            "connectionConfiguration": { "projects": ["FOO"] },
        })))
        .respond_with(json_response(json!({ "status": "succeeded" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/create"))
        .and(body_json(json!({
            "sourceDefinitionId": "def-1",
            "workspaceId": "ws-1",
            "name": "Jira",
            "connectionConfiguration": { "projects": ["FOO"] },
        })))
        .respond_with(json_response(json!({ "sourceId": "src-new" })))
        .expect(1)
        .mount(&server)
        .await;

    let descriptor = SourceDescriptor::new(
        "Jira",
        SourceTarget::New {
            workspace_id: "ws-1".to_string(),
            source_definition_id: "def-1".to_string(),
        },
        json!({ "projects": ["FOO"] }),
    );
    let source_id = ConnectorConfigurator::new(&client)
        .upsert_source(&descriptor)
        .await
        .unwrap();
    assert_eq!(source_id, "src-new");
}

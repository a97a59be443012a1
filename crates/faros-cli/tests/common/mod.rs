// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared helpers for CLI flow tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use clap::Parser;
use faros_cli::{Cli, CliError, CliResult, PromptProvider};
use faros_sync::{RetryPolicy, SyncConfig, SyncOutcome, SyncProgress};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// A scripted answer, consumed in order.
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    MultiSelect(Vec<usize>),
    Text(String),
}

/// Prompt provider replaying a fixed script.
#[derive(Default)]
pub struct ScriptedPrompts {
    answers: Mutex<VecDeque<Answer>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompts {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            asked: Mutex::default(),
        }
    }

    fn next(&self, message: &str) -> CliResult<Answer> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CliError::Input(format!("unexpected prompt: {}", message)))
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl PromptProvider for ScriptedPrompts {
    fn select(&self, message: &str, _choices: &[String]) -> CliResult<usize> {
        match self.next(message)? {
            Answer::Select(index) => Ok(index),
            other => panic!("expected select answer for {:?}, got {:?}", message, other),
        }
    }

    fn multi_select(&self, message: &str, _choices: &[String]) -> CliResult<Vec<usize>> {
        match self.next(message)? {
            Answer::MultiSelect(indices) => Ok(indices),
            other => panic!("expected multi-select answer for {:?}, got {:?}", message, other),
        }
    }

    fn input(&self, message: &str) -> CliResult<String> {
        match self.next(message)? {
            Answer::Text(text) => Ok(text),
            other => panic!("expected text answer for {:?}, got {:?}", message, other),
        }
    }

    fn password(&self, message: &str) -> CliResult<String> {
        self.input(message)
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub ticks: AtomicUsize,
    pub finished: Mutex<Vec<SyncOutcome>>,
}

impl SyncProgress for RecordingProgress {
    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self, outcome: &SyncOutcome) {
        self.finished.lock().unwrap().push(outcome.clone());
    }
}

/// Replies with each template in turn, repeating the last one.
pub struct SequenceResponder {
    responses: Vec<ResponseTemplate>,
    calls: AtomicUsize,
}

impl SequenceResponder {
    pub fn job_statuses(job_id: i64, statuses: &[&str]) -> Self {
        Self {
            responses: statuses.iter().map(|s| job_response(job_id, s)).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses[call.min(self.responses.len() - 1)].clone()
    }
}

pub fn fast_config() -> SyncConfig {
    SyncConfig::new()
        .with_health_retry(RetryPolicy::new(2, Duration::from_millis(5)))
        .with_poll_interval(Duration::from_millis(5))
        .with_request_timeout(Duration::from_secs(5))
}

/// Parse CLI arguments with every URL pointed at the mock server.
pub fn cli(server: &MockServer, args: &[&str]) -> Cli {
    let uri = server.uri();
    let mut argv = vec![
        "faros".to_string(),
        "--airbyte-url".to_string(),
        uri.clone(),
        "--metabase-url".to_string(),
        uri.clone(),
        "--provider-url".to_string(),
        uri,
    ];
    argv.extend(args.iter().map(|arg| arg.to_string()));
    Cli::try_parse_from(argv).unwrap()
}

pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn job_response(id: i64, status: &str) -> ResponseTemplate {
    json_response(json!({ "job": { "id": id, "status": status } }))
}

pub async fn mount_post(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/api/v1{}", route)))
        .respond_with(json_response(body))
        .mount(server)
        .await;
}

/// A healthy sync engine with one workspace and a connection per connector.
pub async fn mount_engine(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(json_response(json!({ "available": true })))
        .mount(server)
        .await;
    mount_post(
        server,
        "/workspaces/list",
        json!({ "workspaces": [{ "workspaceId": "ws-1" }] }),
    )
    .await;
    mount_post(
        server,
        "/connections/list",
        json!({ "connections": [
            { "connectionId": "conn-github", "name": "GitHub - Faros" },
            { "connectionId": "conn-gitlab", "name": "GitLab - Faros" },
            { "connectionId": "conn-bitbucket", "name": "Bitbucket - Faros" },
            { "connectionId": "conn-jira", "name": "Jira - Faros" },
            { "connectionId": "conn-faros-github", "name": "FarosGitHub - Faros" },
        ] }),
    )
    .await;
}

pub async fn mount_sources(server: &MockServer, sources: Value) {
    mount_post(server, "/sources/list", json!({ "sources": sources })).await;
}

/// Check and update both succeed, each expected exactly once.
pub async fn mount_source_update(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/check_connection_for_update"))
        .respond_with(json_response(json!({ "status": "succeeded" })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sources/update"))
        .respond_with(json_response(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_sync(server: &MockServer, job_id: i64, statuses: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/api/v1/connections/sync"))
        .respond_with(job_response(job_id, "running"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/get"))
        .respond_with(SequenceResponder::job_statuses(job_id, statuses))
        .expect(statuses.len() as u64)
        .mount(server)
        .await;
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! faros binary entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use faros_cli::progress::sync_progress;
use faros_cli::{Cli, Context, DialoguerPrompts};
use faros_sync::SyncConfig;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faros=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();

    let config = match SyncConfig::from_env().context("invalid environment configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let prompts = DialoguerPrompts;
    let progress = sync_progress(config.show_progress && std::io::stdout().is_terminal());

    let result = match Context::new(&cli.global, config, &prompts, progress.as_ref()) {
        Ok(ctx) => faros_cli::run(cli, &ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.print();
            ExitCode::from(e.exit_code())
        }
    }
}

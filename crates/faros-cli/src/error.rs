// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI error types and exit codes.

use faros_sync::{ApiError, SyncError};
use thiserror::Error;

use crate::display::use_color;

/// Exit codes for the CLI
/// - 0: Success (including syncs that ran and failed)
/// - 1: General error
/// - 3: Sync engine or provider unreachable
/// - 4: Invalid setup (bad input, missing workspace or connection)
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Listing repositories or projects from the provider failed.
    #[error(transparent)]
    Provider(ApiError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Sync(SyncError::HealthCheckTimeout { .. }) => 3,
            CliError::Sync(SyncError::Api(_)) => 3,
            CliError::Sync(SyncError::Workspace(_)) | CliError::Sync(SyncError::NotFound { .. }) => 4,
            CliError::Sync(_) => 1,
            CliError::Provider(_) => 3,
            CliError::Validation(_) => 4,
            CliError::Input(_) => 1,
        }
    }

    /// Print the error to stderr
    pub fn print(&self) {
        if use_color() {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color() {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Sync(SyncError::HealthCheckTimeout { .. }) => {
                Some("Make sure Faros CE is running and --airbyte-url points at it.")
            }
            CliError::Sync(SyncError::Workspace(_)) => {
                Some("Complete the Airbyte onboarding so that exactly one workspace exists.")
            }
            CliError::Sync(SyncError::NotFound { kind: "connection", .. }) => {
                Some("The connection is created when Faros CE is initialized. Re-run the init step.")
            }
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Input(format!("Dialog error: {}", e))
    }
}

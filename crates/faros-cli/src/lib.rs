// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! faros CLI
//!
//! Walks a user through configuring a data source (GitHub, GitLab,
//! Bitbucket, Jira, Faros GitHub) in Faros CE's sync engine, then runs and
//! watches its first sync. `refresh-sources` re-syncs everything already set up.

pub mod cli;
pub mod commands;
pub mod display;
pub mod error;
pub mod progress;
pub mod prompts;
pub mod providers;

pub use cli::Cli;
pub use commands::{Context, run};
pub use error::{CliError, CliResult};
pub use prompts::{DialoguerPrompts, PromptProvider};

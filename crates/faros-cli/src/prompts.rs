// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Interactive prompts behind a trait, so flows can be scripted in tests.

use std::io::IsTerminal;

use dialoguer::{Input, MultiSelect, Password, Select};

use crate::display::error_log;
use crate::error::{CliError, CliResult};

/// Asks the user for the values a connector flow needs.
pub trait PromptProvider: Send + Sync {
    /// Index of the chosen item.
    fn select(&self, message: &str, choices: &[String]) -> CliResult<usize>;

    /// Indices of the chosen items, possibly none.
    fn multi_select(&self, message: &str, choices: &[String]) -> CliResult<Vec<usize>>;

    fn input(&self, message: &str) -> CliResult<String>;

    /// Like [`PromptProvider::input`] without echoing.
    fn password(&self, message: &str) -> CliResult<String>;

    /// Comma-separated input, trimmed, empty entries dropped.
    fn list(&self, message: &str) -> CliResult<Vec<String>> {
        Ok(parse_list(&self.input(message)?))
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask until `parse` accepts the trimmed answer, printing `invalid` after
/// each rejected one.
pub fn ask_until_valid<T>(
    mut ask: impl FnMut() -> CliResult<String>,
    parse: impl Fn(&str) -> Option<T>,
    invalid: &str,
) -> CliResult<T> {
    loop {
        let answer = ask()?;
        match parse(answer.trim()) {
            Some(value) => return Ok(value),
            None => error_log(invalid),
        }
    }
}

/// Non-empty answer, asked again while empty.
pub fn non_empty(answer: &str) -> Option<String> {
    (!answer.is_empty()).then(|| answer.to_string())
}

/// Terminal prompts.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompts;

impl DialoguerPrompts {
    fn require_terminal() -> CliResult<()> {
        if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
            Ok(())
        } else {
            Err(CliError::Validation(
                "interactive prompts require a terminal; pass the values as flags instead \
                 (see --help)"
                    .to_string(),
            ))
        }
    }
}

impl PromptProvider for DialoguerPrompts {
    fn select(&self, message: &str, choices: &[String]) -> CliResult<usize> {
        Self::require_terminal()?;
        Ok(Select::new()
            .with_prompt(message)
            .items(choices)
            .default(0)
            .interact()?)
    }

    fn multi_select(&self, message: &str, choices: &[String]) -> CliResult<Vec<usize>> {
        Self::require_terminal()?;
        Ok(MultiSelect::new()
            .with_prompt(message)
            .items(choices)
            .interact()?)
    }

    fn input(&self, message: &str) -> CliResult<String> {
        Self::require_terminal()?;
        let value: String = Input::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn password(&self, message: &str) -> CliResult<String> {
        Self::require_terminal()?;
        Ok(Password::new().with_prompt(message).interact()?)
    }
}

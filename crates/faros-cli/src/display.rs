// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! User-facing console output.
//!
//! Separate from tracing: this is what the person running the command reads.
//! `FAROS_SILENT` mutes [`display`], `NO_COLOR` drops ANSI colors and
//! `FAROS_NO_EMOJI` drops emoji.

use std::fmt;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emoji {
    CheckConnection,
    Setup,
    Success,
    Failure,
    Sync,
    Progress,
    Warning,
}

impl Emoji {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emoji::CheckConnection => "🔌",
            Emoji::Setup => "⚙️",
            Emoji::Success => "✅",
            Emoji::Failure => "❌",
            Emoji::Sync => "🔄",
            Emoji::Progress => "🟢",
            Emoji::Warning => "⚠️",
        }
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if use_emoji() {
            f.write_str(self.as_str())
        } else {
            Ok(())
        }
    }
}

pub fn use_emoji() -> bool {
    std::env::var_os("FAROS_NO_EMOJI").is_none()
}

pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn is_silent() -> bool {
    std::env::var_os("FAROS_SILENT").is_some()
}

/// Print an informational line to stdout.
pub fn display(msg: impl fmt::Display) {
    if !is_silent() {
        println!("{}", msg.to_string().trim_end());
    }
}

/// Print an error line to stderr, in red.
pub fn error_log(msg: impl fmt::Display) {
    if use_color() {
        eprintln!("\x1b[31m{}\x1b[0m", msg);
    } else {
        eprintln!("{}", msg);
    }
}

/// Print a warning line to stderr, in yellow.
pub fn warn(msg: impl fmt::Display) {
    if use_color() {
        eprintln!("\x1b[33m{}\x1b[0m", msg);
    } else {
        eprintln!("{}", msg);
    }
}

/// Clickable link on terminals, `text (url)` elsewhere.
pub fn terminal_link(text: &str, url: &str) -> String {
    format_link(text, url, std::io::stderr().is_terminal() && use_color())
}

fn format_link(text: &str, url: &str, hyperlink: bool) -> String {
    if hyperlink {
        format!("\x1b]8;;{url}\x1b\\{text}\x1b]8;;\x1b\\")
    } else {
        format!("{text} ({url})")
    }
}

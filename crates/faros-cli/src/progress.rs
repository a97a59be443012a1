// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spinner shown while a sync job is polled.

use faros_sync::{NoProgress, SyncOutcome, SyncProgress};
use indicatif::{ProgressBar, ProgressStyle};

use crate::display::use_emoji;

/// A spinner advanced once per job poll.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let tick_chars = if use_emoji() { "🟢⚪ " } else { ".  " };
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            bar.set_style(style.tick_chars(tick_chars));
        }
        bar.set_message(message.to_string());
        Self { bar }
    }
}

impl SyncProgress for SpinnerProgress {
    fn tick(&self) {
        self.bar.tick();
    }

    fn finish(&self, _outcome: &SyncOutcome) {
        self.bar.finish_and_clear();
    }
}

/// Spinner when `enabled`, otherwise a sink that discards ticks.
pub fn sync_progress(enabled: bool) -> Box<dyn SyncProgress> {
    if enabled {
        Box::new(SpinnerProgress::new("Syncing"))
    } else {
        Box::new(NoProgress)
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Progress feedback emitted while a sync job is polled.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::SyncOutcome;

/// Receives one tick per poll iteration. Purely cosmetic.
pub trait SyncProgress: Send + Sync {
    /// Called before every status poll.
    fn tick(&self);

    /// Called once when tracking ends.
    fn finish(&self, _outcome: &SyncOutcome) {}
}

/// Progress sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl SyncProgress for NoProgress {
    fn tick(&self) {}
}

/// Shares one sink between concurrent trackers.
///
/// Ticks pass straight through; the inner sink is finished once, by the last
/// tracker to end.
pub(crate) struct SharedProgress<'a> {
    inner: &'a dyn SyncProgress,
    running: AtomicUsize,
}

impl<'a> SharedProgress<'a> {
    pub(crate) fn new(inner: &'a dyn SyncProgress, trackers: usize) -> Self {
        Self {
            inner,
            running: AtomicUsize::new(trackers),
        }
    }
}

impl SyncProgress for SharedProgress<'_> {
    fn tick(&self) {
        self.inner.tick();
    }

    fn finish(&self, outcome: &SyncOutcome) {
        if self.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.finish(outcome);
        }
    }
}

//! Periodic resort of the collection while fetches are in flight.
//!
//! The ticker is the only way the UI learns about new fetch results: when the
//! number of stored releases (or failed repositories) changes, it sorts the
//! collection newest-first and asks the UI thread for a full redraw.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use crate::release::ReleaseCollection;
use crate::signals::{RedrawSignal, RunFlag};

/// Default interval between checks.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(500);

pub struct RefreshTicker {
    collection: Arc<ReleaseCollection>,
    redraw: RedrawSignal,
    running: RunFlag,
    interval: Duration,
    last_count: usize,
    last_failed: usize,
}

impl RefreshTicker {
    pub fn new(
        collection: Arc<ReleaseCollection>,
        redraw: RedrawSignal,
        running: RunFlag,
        interval: Duration,
    ) -> Self {
        Self {
            collection,
            redraw,
            running,
            interval,
            last_count: 0,
            last_failed: 0,
        }
    }

    /// One check. Returns `true` when a redraw was requested.
    pub fn tick(&mut self) -> bool {
        let count = self.collection.len();
        let failed = self.collection.failed_count();

        if count == self.last_count && failed == self.last_failed {
            return false;
        }

        if count != self.last_count {
            debug!("Release count changed {} -> {}, resorting", self.last_count, count);
            self.collection.sort_by_date_descending();
        }
        self.last_count = count;
        self.last_failed = failed;
        self.redraw.request();
        true
    }

    /// Runs until the run flag clears.
    pub async fn run(mut self) {
        while self.running.is_running() {
            tokio::time::sleep(self.interval).await;
            if !self.running.is_running() {
                break;
            }
            self.tick();
        }
        debug!("Refresh ticker stopped");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

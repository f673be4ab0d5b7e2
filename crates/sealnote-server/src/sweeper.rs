//! Periodic background sweep.
//!
//! Runs one pass immediately on startup, then one per configured interval.
//! The interval should be comfortably longer than a pass takes — missed
//! ticks are delayed, not bursted, so passes never overlap themselves.
//! Correctness does not depend on the cadence: read-time expiration
//! checking is authoritative, the sweep only reclaims storage.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::service::NoteService;

pub struct Sweeper {
    service: Arc<NoteService>,
    interval: Duration,
}

impl Sweeper {
    pub fn new(service: Arc<NoteService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Spawn the sweep loop onto the current tokio runtime. The task runs
    /// until the handle is dropped or aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = self.interval.as_secs(), "sweeper started");

            loop {
                ticker.tick().await;
                // sweep() logs per-note failures itself and never bails
                self.service.sweep();
            }
        })
    }
}

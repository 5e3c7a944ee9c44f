use std::{
    sync::{Arc, atomic::Ordering},
    time::{Duration, Instant},
};

use steel_config::TrackingConfig;
use steel_world::ChunkReadinessTracker;
use tokio::time::sleep;

use crate::SHOULD_STOP;

/// Logs generation progress at a fixed tick rate until every tracked chunk is ready.
pub struct ProgressTicker {
    tick_interval: Duration,
    progress_interval: u32,
    last_tick: Instant,
    ticks: u64,
}

impl ProgressTicker {
    #[must_use]
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            progress_interval: config.progress_interval_ticks.max(1),
            last_tick: Instant::now(),
            ticks: 0,
        }
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns `true` once all tracked chunks are ready.
    fn tick(&mut self, tracker: &ChunkReadinessTracker) -> bool {
        self.ticks += 1;
        let ready = tracker.ready_count();
        let tracked = tracker.tracked_count();
        if self.ticks % u64::from(self.progress_interval) == 0 {
            log::info!("Waiting for chunks ({ready}/{tracked} ready)...");
        }
        ready >= tracked
    }

    /// IMPORTANT: Run this in a new tokio task.
    pub async fn run(&mut self, tracker: Arc<ChunkReadinessTracker>) {
        while !SHOULD_STOP.load(Ordering::Relaxed) {
            let now = Instant::now();
            let elapsed = now - self.last_tick;

            if elapsed >= self.tick_interval {
                self.last_tick = now;
                if self.tick(&tracker) {
                    break;
                }
            } else {
                sleep(self.tick_interval - elapsed).await;
            }
        }
        log::debug!("Ticker stopped after {} ticks", self.ticks);
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// How long to wait for every tracked chunk to finish generating before writing a partial
    /// report.
    pub wait_timeout_secs: u64,
    /// Log the ready/tracked counts every this many ticks.
    pub progress_interval_ticks: u32,
    /// Ticks per second of the progress ticker.
    pub tps: f32,
}

impl TrackingConfig {
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f32(1.0 / self.tps).unwrap_or(Duration::from_millis(50))
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: 300,
            progress_interval_ticks: 100,
            tps: 20.0,
        }
    }
}

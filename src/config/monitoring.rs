//! Monitoring poller configuration.

use super::env_parse;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MonitoringPollerConfig {
    pub interval_seconds: u64,
}

impl Default for MonitoringPollerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
        }
    }
}

impl MonitoringPollerConfig {
    pub fn from_env() -> Self {
        Self {
            // A zero interval would make tokio's timer panic.
            interval_seconds: env_parse("MONITORING_POLL_INTERVAL_SECONDS", 30u64).max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

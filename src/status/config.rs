//! Configuration for wake-cycle handling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the backend wake-up resilience layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeConfig {
    /// Timeout for each health probe request.
    pub probe_timeout_seconds: u64,
    /// How long after a confirmed-awake probe transient failures are
    /// assumed to be network blips rather than cold starts.
    pub grace_window_seconds: u64,
    /// Fixed delay before replaying a failed request when the backend is
    /// presumed to be cold-starting.
    pub retry_delay_seconds: u64,
    /// Interval of the background poll while a wake cycle is active.
    pub poll_interval_seconds: u64,
    /// Cycle age after which the poll starts re-probing health.
    pub recheck_after_seconds: u64,
    /// Hard ceiling on a wake cycle; the notification is force-cleared
    /// once this much time has elapsed, regardless of probe outcomes.
    pub max_wait_seconds: u64,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: 2,
            grace_window_seconds: 300,
            retry_delay_seconds: 5,
            poll_interval_seconds: 5,
            recheck_after_seconds: 45,
            max_wait_seconds: 60,
        }
    }
}

impl WakeConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    pub fn grace_window(&self) -> Duration {
        Duration::from_secs(self.grace_window_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn recheck_after(&self) -> Duration {
        Duration::from_secs(self.recheck_after_seconds)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_seconds)
    }
}

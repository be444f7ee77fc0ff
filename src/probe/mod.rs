//! Backend health probing.
//!
//! A probe is a lightweight GET against the backend's health endpoint with
//! a deliberately short timeout: its only job is to decide quickly whether
//! the backend is serving traffic or (most likely) cold-starting. Probe
//! failures are never errors; every outcome maps to one of two states.

use crate::wake::WakeTracker;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Classification of a single health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The health endpoint answered 2xx: the backend is serving traffic.
    Awake,
    /// Transport error, timeout, or non-2xx status: not ready.
    Unreachable,
}

/// Issues health probes and feeds confirmed-awake observations to the
/// wakefulness tracker.
///
/// Owns its own HTTP client so the short probe timeout never interferes
/// with the API client's request budget.
pub struct HealthProbe {
    client: reqwest::Client,
    health_url: String,
    tracker: Arc<WakeTracker>,
}

impl HealthProbe {
    /// Create a probe for `<base_url>/health` with the given timeout.
    pub fn new(base_url: &str, timeout: Duration, tracker: Arc<WakeTracker>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            health_url: format!("{}/health", base_url.trim_end_matches('/')),
            tracker,
        }
    }

    /// Probe the backend once.
    ///
    /// On `Awake`, the tracker's last-awake mark is advanced as a side
    /// effect. Never returns an error: all failure modes collapse to
    /// `Unreachable`.
    pub async fn probe(&self) -> ProbeOutcome {
        let start = Instant::now();

        match self.client.get(&self.health_url).send().await {
            Ok(response) => {
                let latency = start.elapsed();
                metrics::histogram!("podesk_probe_latency_seconds").record(latency.as_secs_f64());

                if response.status().is_success() {
                    tracing::debug!(latency_ms = latency.as_millis() as u64, "Backend awake");
                    self.tracker.mark_awake();
                    ProbeOutcome::Awake
                } else {
                    tracing::debug!(status = %response.status(), "Health endpoint returned error status");
                    ProbeOutcome::Unreachable
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Health probe timed out");
                } else {
                    tracing::debug!(error = %e, "Health probe failed");
                }
                ProbeOutcome::Unreachable
            }
        }
    }

    /// The wakefulness tracker this probe reports into.
    pub fn tracker(&self) -> &Arc<WakeTracker> {
        &self.tracker
    }
}

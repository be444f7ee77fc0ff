//! Backend status state machine.
//!
//! Coordinates wake cycles: the retry policy (or the startup probe) reports
//! a suspected cold start, the monitor decides whether a notification
//! should be visible, re-probes health while the cycle ages, and guarantees
//! the notification never sticks past a hard ceiling. Consumers observe
//! `is_waking_up` through a watch channel rather than a global hook.

mod config;
mod state;

#[cfg(test)]
mod tests;

pub use config::WakeConfig;
pub use state::{TickAction, TriggerOutcome, WakeCycle, WakeState};

use crate::probe::{HealthProbe, ProbeOutcome};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Owns the wake-cycle state and the background poll.
///
/// Shared behind an `Arc`; all entry points are idempotent under
/// concurrent callers (triggering while already `Waking` is a no-op).
pub struct BackendStatusMonitor {
    state: Mutex<WakeState>,
    probe: Arc<HealthProbe>,
    config: WakeConfig,
    waking_tx: watch::Sender<bool>,
}

impl BackendStatusMonitor {
    pub fn new(probe: Arc<HealthProbe>, config: WakeConfig) -> Arc<Self> {
        let (waking_tx, _) = watch::channel(false);
        Arc::new(Self {
            state: Mutex::new(WakeState::default()),
            probe,
            config,
            waking_tx,
        })
    }

    /// Whether a wake-up notification should currently be shown.
    pub fn is_waking_up(&self) -> bool {
        *self.waking_tx.borrow()
    }

    /// Subscribe to `is_waking_up` changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.waking_tx.subscribe()
    }

    /// Report a suspected cold start. Entry point for the retry policy.
    ///
    /// Suppressed while the wakefulness tracker reports recently-awake,
    /// and a no-op while a cycle is already active.
    pub fn trigger_wakeup(&self) {
        let recently_awake = self.probe.tracker().is_recently_awake();
        let outcome = self
            .lock_state()
            .trigger(recently_awake, Instant::now());

        match outcome {
            TriggerOutcome::Started => {
                metrics::counter!("podesk_wake_cycles_total").increment(1);
                tracing::info!("Backend presumed cold-starting, wake cycle started");
                self.publish(true);
            }
            TriggerOutcome::AlreadyWaking => {
                tracing::debug!("Wake cycle already active, trigger ignored");
            }
            TriggerOutcome::Suppressed => {
                tracing::debug!("Backend recently awake, wake trigger suppressed");
            }
        }
    }

    /// Directly set the notification state.
    ///
    /// `true` starts a cycle unconditionally (no grace-window gate);
    /// `false` dismisses the active cycle. Intended for the notification
    /// surface, which may let the user dismiss the notice early.
    pub fn set_waking_up(&self, waking: bool) {
        if waking {
            if self.lock_state().force_waking(Instant::now()) {
                metrics::counter!("podesk_wake_cycles_total").increment(1);
                self.publish(true);
            }
        } else {
            self.clear_cycle("dismissed");
        }
    }

    /// Probe health once and fold the outcome into the state machine.
    ///
    /// Used on startup to establish ground truth without waiting for a
    /// request to fail: `Unreachable` starts a cycle (subject to the
    /// grace-window gate), `Awake` ends any active one.
    pub async fn probe_now(&self) -> ProbeOutcome {
        let outcome = self.probe.probe().await;
        match outcome {
            ProbeOutcome::Awake => self.clear_cycle("awake"),
            ProbeOutcome::Unreachable => self.trigger_wakeup(),
        }
        outcome
    }

    /// One iteration of the background poll.
    ///
    /// The hard ceiling applies regardless of probe outcomes; a probe
    /// failure neither extends nor shortens the cycle.
    pub async fn poll_once(&self) {
        let action = self.lock_state().tick(
            Instant::now(),
            self.config.recheck_after(),
            self.config.max_wait(),
        );

        match action {
            TickAction::ForceClear => {
                metrics::counter!("podesk_wake_cycles_cleared_total", "reason" => "ceiling")
                    .increment(1);
                tracing::warn!(
                    max_wait_seconds = self.config.max_wait_seconds,
                    "Wake cycle exceeded ceiling, clearing notification"
                );
                self.publish(false);
            }
            TickAction::Reprobe => {
                let outcome = self.probe.probe().await;
                if self.lock_state().observe_probe(outcome) {
                    metrics::counter!("podesk_wake_cycles_cleared_total", "reason" => "awake")
                        .increment(1);
                    tracing::info!("Backend answered health probe, wake cycle cleared");
                    self.publish(false);
                }
            }
            TickAction::Wait | TickAction::Idle => {}
        }
    }

    /// Start the background poll. Returns a handle that resolves when the
    /// monitor stops; cancel the token on teardown so no timer outlives
    /// its owner.
    pub fn start(self: &Arc<Self>, cancel_token: CancellationToken) -> JoinHandle<()> {
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            // Ground truth before any request has a chance to fail.
            monitor.probe_now().await;

            let mut interval = tokio::time::interval(monitor.config.poll_interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::debug!(
                poll_interval_seconds = monitor.config.poll_interval_seconds,
                "Backend status monitor started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::debug!("Backend status monitor shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        monitor.poll_once().await;
                    }
                }
            }
        })
    }

    fn clear_cycle(&self, reason: &'static str) {
        if self.lock_state().clear() {
            metrics::counter!("podesk_wake_cycles_cleared_total", "reason" => reason).increment(1);
            tracing::info!(reason, "Wake cycle cleared");
            self.publish(false);
        }
    }

    fn publish(&self, waking: bool) {
        self.waking_tx.send_replace(waking);
    }

    /// The lock is never held across an await point.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, WakeState> {
        self.state.lock().expect("wake state lock poisoned")
    }
}

//! Pure wake-cycle state transitions.
//!
//! Separated from the monitor so the timing invariants can be tested
//! without a running poll loop or a live backend.

use crate::probe::ProbeOutcome;
use std::time::Duration;
use tokio::time::Instant;

/// One episode of suspected backend sleep.
#[derive(Debug, Clone, Copy)]
pub struct WakeCycle {
    /// When the cycle entered `Waking`.
    pub started_at: Instant,
}

/// Result of an external trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Transitioned `Idle` -> `Waking`.
    Started,
    /// A cycle is already active; the trigger is a no-op.
    AlreadyWaking,
    /// The backend was recently confirmed awake; the trigger is ignored.
    Suppressed,
}

/// What the background poll should do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// No cycle active.
    Idle,
    /// Cycle active but too young to re-probe; keep waiting.
    Wait,
    /// Cycle old enough that the backend may have finished starting.
    Reprobe,
    /// Cycle exceeded the hard ceiling and was cleared.
    ForceClear,
}

/// Wake-cycle state: `Idle` (no cycle) or `Waking` (one active cycle).
///
/// At most one cycle is active at a time; concurrent triggers collapse
/// into the existing cycle.
#[derive(Debug, Default)]
pub struct WakeState {
    cycle: Option<WakeCycle>,
}

impl WakeState {
    pub fn is_waking(&self) -> bool {
        self.cycle.is_some()
    }

    /// Age of the active cycle, if any.
    pub fn cycle_age(&self, now: Instant) -> Option<Duration> {
        self.cycle
            .map(|c| now.saturating_duration_since(c.started_at))
    }

    /// External trigger (retry policy or initial-load probe failure).
    ///
    /// Ignored while the backend is within the grace window, and a no-op
    /// when a cycle is already active.
    pub fn trigger(&mut self, recently_awake: bool, now: Instant) -> TriggerOutcome {
        if self.cycle.is_some() {
            return TriggerOutcome::AlreadyWaking;
        }
        if recently_awake {
            return TriggerOutcome::Suppressed;
        }
        self.cycle = Some(WakeCycle { started_at: now });
        TriggerOutcome::Started
    }

    /// Start a cycle unconditionally, bypassing the grace-window gate.
    /// No-op when a cycle is already active.
    pub fn force_waking(&mut self, now: Instant) -> bool {
        if self.cycle.is_some() {
            return false;
        }
        self.cycle = Some(WakeCycle { started_at: now });
        true
    }

    /// Clear the active cycle. Returns whether one was active.
    pub fn clear(&mut self) -> bool {
        self.cycle.take().is_some()
    }

    /// Apply a probe observation: `Awake` ends the cycle, `Unreachable`
    /// neither extends nor shortens it.
    pub fn observe_probe(&mut self, outcome: ProbeOutcome) -> bool {
        match outcome {
            ProbeOutcome::Awake => self.clear(),
            ProbeOutcome::Unreachable => false,
        }
    }

    /// Advance the cycle clock. The ceiling applies unconditionally;
    /// re-probing only begins once the cycle is old enough to give the
    /// backend a chance to finish starting.
    pub fn tick(&mut self, now: Instant, recheck_after: Duration, max_wait: Duration) -> TickAction {
        let Some(age) = self.cycle_age(now) else {
            return TickAction::Idle;
        };

        if age >= max_wait {
            self.cycle = None;
            TickAction::ForceClear
        } else if age >= recheck_after {
            TickAction::Reprobe
        } else {
            TickAction::Wait
        }
    }
}

//! Unit tests for the backend status state machine.

use super::*;
use crate::probe::{HealthProbe, ProbeOutcome};
use crate::store::MemoryStore;
use crate::wake::WakeTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

// ============================================================================
// WakeConfig
// ============================================================================

#[test]
fn config_default_values() {
    let config = WakeConfig::default();
    assert_eq!(config.probe_timeout_seconds, 2);
    assert_eq!(config.grace_window_seconds, 300);
    assert_eq!(config.retry_delay_seconds, 5);
    assert_eq!(config.poll_interval_seconds, 5);
    assert_eq!(config.recheck_after_seconds, 45);
    assert_eq!(config.max_wait_seconds, 60);
}

#[test]
fn config_toml_parsing() {
    let toml = r#"
        max_wait_seconds = 90
        recheck_after_seconds = 70
    "#;
    let config: WakeConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.max_wait_seconds, 90);
    assert_eq!(config.recheck_after_seconds, 70);
    assert_eq!(config.poll_interval_seconds, 5); // default
}

// ============================================================================
// WakeState: trigger transitions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn idle_to_waking_on_trigger() {
    let mut state = WakeState::default();
    assert!(!state.is_waking());

    let outcome = state.trigger(false, Instant::now());
    assert_eq!(outcome, TriggerOutcome::Started);
    assert!(state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn trigger_while_waking_is_noop() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    let outcome = state.trigger(false, Instant::now());
    assert_eq!(outcome, TriggerOutcome::AlreadyWaking);
    assert!(state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn trigger_suppressed_when_recently_awake() {
    let mut state = WakeState::default();

    let outcome = state.trigger(true, Instant::now());
    assert_eq!(outcome, TriggerOutcome::Suppressed);
    assert!(!state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn force_waking_ignores_grace_gate() {
    let mut state = WakeState::default();
    assert!(state.force_waking(Instant::now()));
    assert!(state.is_waking());

    // Second force is a no-op against the existing cycle.
    assert!(!state.force_waking(Instant::now()));
}

// ============================================================================
// WakeState: probe observations
// ============================================================================

#[tokio::test(start_paused = true)]
async fn awake_probe_clears_cycle() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    assert!(state.observe_probe(ProbeOutcome::Awake));
    assert!(!state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn unreachable_probe_does_not_extend_or_clear() {
    let mut state = WakeState::default();
    let started = Instant::now();
    state.trigger(false, started);

    assert!(!state.observe_probe(ProbeOutcome::Unreachable));
    assert!(state.is_waking());

    // The cycle clock still runs from the original start.
    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(
        state.cycle_age(Instant::now()),
        Some(Duration::from_secs(10))
    );
}

#[tokio::test(start_paused = true)]
async fn awake_probe_while_idle_is_noop() {
    let mut state = WakeState::default();
    assert!(!state.observe_probe(ProbeOutcome::Awake));
}

// ============================================================================
// WakeState: tick timing
// ============================================================================

const RECHECK: Duration = Duration::from_secs(45);
const CEILING: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn tick_idle_without_cycle() {
    let mut state = WakeState::default();
    assert_eq!(state.tick(Instant::now(), RECHECK, CEILING), TickAction::Idle);
}

#[tokio::test(start_paused = true)]
async fn young_cycle_waits() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    tokio::time::advance(Duration::from_secs(44)).await;
    assert_eq!(state.tick(Instant::now(), RECHECK, CEILING), TickAction::Wait);
    assert!(state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn cycle_past_recheck_threshold_reprobes() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    tokio::time::advance(Duration::from_secs(45)).await;
    assert_eq!(
        state.tick(Instant::now(), RECHECK, CEILING),
        TickAction::Reprobe
    );
    assert!(state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn cycle_at_ceiling_force_clears() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(
        state.tick(Instant::now(), RECHECK, CEILING),
        TickAction::ForceClear
    );
    assert!(!state.is_waking());
}

#[tokio::test(start_paused = true)]
async fn ceiling_wins_over_reprobe() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());

    tokio::time::advance(Duration::from_secs(120)).await;
    assert_eq!(
        state.tick(Instant::now(), RECHECK, CEILING),
        TickAction::ForceClear
    );
}

#[tokio::test(start_paused = true)]
async fn tick_after_force_clear_is_idle() {
    let mut state = WakeState::default();
    state.trigger(false, Instant::now());
    tokio::time::advance(Duration::from_secs(60)).await;
    state.tick(Instant::now(), RECHECK, CEILING);

    assert_eq!(state.tick(Instant::now(), RECHECK, CEILING), TickAction::Idle);
}

// ============================================================================
// BackendStatusMonitor
// ============================================================================

const GRACE: Duration = Duration::from_secs(300);

/// Monitor whose probe points at a port that refuses connections.
fn unreachable_monitor(config: WakeConfig) -> (Arc<WakeTracker>, Arc<BackendStatusMonitor>) {
    let tracker = Arc::new(WakeTracker::new(Arc::new(MemoryStore::new()), GRACE));
    let probe = Arc::new(HealthProbe::new(
        "http://127.0.0.1:1",
        Duration::from_secs(1),
        tracker.clone(),
    ));
    (tracker.clone(), BackendStatusMonitor::new(probe, config))
}

#[tokio::test]
async fn monitor_starts_idle() {
    let (_, monitor) = unreachable_monitor(WakeConfig::default());
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn trigger_publishes_to_subscribers() {
    let (_, monitor) = unreachable_monitor(WakeConfig::default());
    let mut rx = monitor.subscribe();
    assert!(!*rx.borrow());

    monitor.trigger_wakeup();

    rx.changed().await.unwrap();
    assert!(*rx.borrow());
    assert!(monitor.is_waking_up());
}

#[tokio::test]
async fn concurrent_triggers_yield_one_cycle() {
    let (_, monitor) = unreachable_monitor(WakeConfig::default());
    let mut rx = monitor.subscribe();

    monitor.trigger_wakeup();
    monitor.trigger_wakeup();
    monitor.trigger_wakeup();

    rx.changed().await.unwrap();
    assert!(*rx.borrow());
    // No further change is pending: the repeat triggers were no-ops.
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn trigger_gated_by_recent_awake() {
    let (tracker, monitor) = unreachable_monitor(WakeConfig::default());
    tracker.mark_awake();

    monitor.trigger_wakeup();
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn set_waking_up_dismisses_cycle() {
    let (_, monitor) = unreachable_monitor(WakeConfig::default());
    monitor.trigger_wakeup();
    assert!(monitor.is_waking_up());

    monitor.set_waking_up(false);
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn set_waking_up_true_bypasses_gate() {
    let (tracker, monitor) = unreachable_monitor(WakeConfig::default());
    tracker.mark_awake();

    monitor.set_waking_up(true);
    assert!(monitor.is_waking_up());
}

#[tokio::test]
async fn probe_now_unreachable_starts_cycle() {
    let (_, monitor) = unreachable_monitor(WakeConfig::default());

    let outcome = monitor.probe_now().await;
    assert_eq!(outcome, ProbeOutcome::Unreachable);
    assert!(monitor.is_waking_up());
}

#[tokio::test]
async fn probe_now_awake_clears_cycle() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let tracker = Arc::new(WakeTracker::new(Arc::new(MemoryStore::new()), GRACE));
    let probe = Arc::new(HealthProbe::new(
        &server.uri(),
        Duration::from_secs(2),
        tracker,
    ));
    let monitor = BackendStatusMonitor::new(probe, WakeConfig::default());

    monitor.trigger_wakeup();
    assert!(monitor.is_waking_up());

    let outcome = monitor.probe_now().await;
    assert_eq!(outcome, ProbeOutcome::Awake);
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn poll_force_clears_at_ceiling() {
    // Zero ceiling: the first poll already exceeds it.
    let config = WakeConfig {
        recheck_after_seconds: 0,
        max_wait_seconds: 0,
        ..WakeConfig::default()
    };
    let (_, monitor) = unreachable_monitor(config);

    monitor.trigger_wakeup();
    assert!(monitor.is_waking_up());

    monitor.poll_once().await;
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn poll_reprobe_clears_when_backend_answers() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let tracker = Arc::new(WakeTracker::new(Arc::new(MemoryStore::new()), GRACE));
    let probe = Arc::new(HealthProbe::new(
        &server.uri(),
        Duration::from_secs(2),
        tracker,
    ));
    // Re-probe from the first tick, generous ceiling: the clear must come
    // from the probe, not the ceiling.
    let config = WakeConfig {
        recheck_after_seconds: 0,
        max_wait_seconds: 3600,
        ..WakeConfig::default()
    };
    let monitor = BackendStatusMonitor::new(probe, config);

    monitor.set_waking_up(true);
    monitor.poll_once().await;
    assert!(!monitor.is_waking_up());
}

#[tokio::test]
async fn poll_failed_reprobe_keeps_cycle() {
    let config = WakeConfig {
        recheck_after_seconds: 0,
        max_wait_seconds: 3600,
        ..WakeConfig::default()
    };
    let (_, monitor) = unreachable_monitor(config);

    monitor.trigger_wakeup();
    monitor.poll_once().await;
    assert!(monitor.is_waking_up());
}

#[tokio::test]
async fn start_runs_initial_probe_and_cancels_cleanly() {
    let config = WakeConfig {
        poll_interval_seconds: 1,
        ..WakeConfig::default()
    };
    let (_, monitor) = unreachable_monitor(config);

    let cancel = tokio_util::sync::CancellationToken::new();
    let handle = monitor.start(cancel.clone());

    // The unconditional startup probe hits a refused port and starts a
    // cycle without any request having failed.
    let mut rx = monitor.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|waking| *waking))
        .await
        .expect("startup probe should start a wake cycle")
        .unwrap();

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("monitor should stop on cancellation")
        .unwrap();
}

//! Wakefulness tracking across wake cycles and process restarts.
//!
//! Records the most recent moment the backend was confirmed reachable. The
//! mark is the cross-cycle memory that keeps a one-off network blip from
//! being mistaken for a cold start: while the mark is fresh, wake-up
//! notifications are suppressed.

use crate::store::KeyValueStore;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Storage key for the persisted mark, string-encoded epoch milliseconds.
pub const LAST_AWAKE_KEY: &str = "lastBackendAwakeTime";

/// Tracks when the backend was last confirmed awake.
///
/// The mark lives in memory for fast gate decisions and is mirrored to the
/// injected store so it survives a restart. It only ever moves forward.
pub struct WakeTracker {
    store: Arc<dyn KeyValueStore>,
    /// Epoch milliseconds of the last confirmed-awake probe; 0 = never.
    last_awake_ms: AtomicI64,
    grace_window: Duration,
}

impl WakeTracker {
    /// Create a tracker, seeding the in-memory mark from the store.
    pub fn new(store: Arc<dyn KeyValueStore>, grace_window: Duration) -> Self {
        let seeded = store
            .get(LAST_AWAKE_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Self {
            store,
            last_awake_ms: AtomicI64::new(seeded),
            grace_window,
        }
    }

    /// Record a confirmed-awake observation at the current wall-clock time.
    pub fn mark_awake(&self) {
        self.mark_awake_at(chrono::Utc::now().timestamp_millis());
    }

    /// Record a confirmed-awake observation at an explicit timestamp.
    ///
    /// The mark is monotonically non-decreasing: an observation older than
    /// the current mark is ignored.
    pub fn mark_awake_at(&self, epoch_ms: i64) {
        let previous = self.last_awake_ms.fetch_max(epoch_ms, Ordering::SeqCst);
        if epoch_ms > previous {
            self.store.set(LAST_AWAKE_KEY, &epoch_ms.to_string());
            tracing::debug!(epoch_ms, "Backend confirmed awake");
        }
    }

    /// Epoch milliseconds of the last confirmed-awake probe, if any.
    pub fn last_awake_ms(&self) -> Option<i64> {
        match self.last_awake_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => Some(ms),
        }
    }

    /// Whether the backend was confirmed awake within the grace window.
    ///
    /// Gate for wake-up notifications: a fresh mark means a transient
    /// failure is assumed to be a network blip, not a cold start.
    pub fn is_recently_awake(&self) -> bool {
        self.is_recently_awake_at(chrono::Utc::now().timestamp_millis())
    }

    fn is_recently_awake_at(&self, now_ms: i64) -> bool {
        match self.last_awake_ms() {
            Some(mark) => now_ms.saturating_sub(mark) < self.grace_window.as_millis() as i64,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    const GRACE: Duration = Duration::from_secs(300);

    fn tracker() -> (Arc<MemoryStore>, WakeTracker) {
        let store = Arc::new(MemoryStore::new());
        let tracker = WakeTracker::new(store.clone(), GRACE);
        (store, tracker)
    }

    #[test]
    fn never_awake_is_not_recent() {
        let (_, tracker) = tracker();
        assert!(tracker.last_awake_ms().is_none());
        assert!(!tracker.is_recently_awake());
    }

    #[test]
    fn mark_persists_to_store() {
        let (store, tracker) = tracker();
        tracker.mark_awake_at(1_700_000_000_000);
        assert_eq!(
            store.get(LAST_AWAKE_KEY).as_deref(),
            Some("1700000000000")
        );
    }

    #[test]
    fn mark_is_seeded_from_store_on_startup() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_AWAKE_KEY, "1700000000000");

        let tracker = WakeTracker::new(store, GRACE);
        assert_eq!(tracker.last_awake_ms(), Some(1_700_000_000_000));
    }

    #[test]
    fn corrupt_stored_mark_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_AWAKE_KEY, "not-a-timestamp");

        let tracker = WakeTracker::new(store, GRACE);
        assert!(tracker.last_awake_ms().is_none());
    }

    #[test]
    fn mark_never_moves_backward() {
        let (store, tracker) = tracker();
        tracker.mark_awake_at(2_000);
        tracker.mark_awake_at(1_000);

        assert_eq!(tracker.last_awake_ms(), Some(2_000));
        assert_eq!(store.get(LAST_AWAKE_KEY).as_deref(), Some("2000"));
    }

    #[test]
    fn within_grace_window_is_recent() {
        let (_, tracker) = tracker();
        let now = 1_700_000_000_000;
        tracker.mark_awake_at(now - 60_000); // 1 minute ago
        assert!(tracker.is_recently_awake_at(now));
    }

    #[test]
    fn outside_grace_window_is_not_recent() {
        let (_, tracker) = tracker();
        let now = 1_700_000_000_000;
        tracker.mark_awake_at(now - 301_000); // just past 5 minutes
        assert!(!tracker.is_recently_awake_at(now));
    }

    #[test]
    fn grace_window_boundary_is_exclusive() {
        let (_, tracker) = tracker();
        let now = 1_700_000_000_000;
        tracker.mark_awake_at(now - 300_000); // exactly 5 minutes
        assert!(!tracker.is_recently_awake_at(now));
    }

    proptest! {
        /// The mark is monotonically non-decreasing over any observation
        /// sequence, and always lands on the maximum seen so far.
        #[test]
        fn mark_is_monotone_over_any_sequence(timestamps in prop::collection::vec(0i64..=i64::MAX / 2, 1..50)) {
            let (_, tracker) = tracker();
            let mut max_seen = 0i64;

            for ts in timestamps {
                let before = tracker.last_awake_ms().unwrap_or(0);
                tracker.mark_awake_at(ts);
                let after = tracker.last_awake_ms().unwrap_or(0);

                prop_assert!(after >= before);
                max_seen = max_seen.max(ts);
                prop_assert_eq!(after, max_seen);
            }
        }
    }
}

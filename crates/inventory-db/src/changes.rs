//! # Change Tracking
//!
//! Per-table change versions that drive live queries.
//!
//! ## How Live Queries Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Invalidation Flow                                  │
//! │                                                                         │
//! │  ItemDao::insert / update / delete                                     │
//! │       │  (only when rows were affected)                                 │
//! │       ▼                                                                 │
//! │  ChangeTracker::notify("items")  ── watch version: 41 → 42             │
//! │       │                                                                 │
//! │       ├──► subscriber A: WatchStream wakes → re-runs its query         │
//! │       └──► subscriber B: WatchStream wakes → re-runs its query         │
//! │                                                                         │
//! │  Bursts of writes coalesce: a slow subscriber sees only the latest     │
//! │  version and re-queries once.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::trace;

/// Shared registry of table versions. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    tables: Arc<Mutex<HashMap<&'static str, watch::Sender<u64>>>>,
}

impl ChangeTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        ChangeTracker::default()
    }

    /// Records that `table` changed and wakes every subscriber of it.
    pub fn notify(&self, table: &'static str) {
        let mut tables = self.lock();
        let sender = tables
            .entry(table)
            .or_insert_with(|| watch::channel(0).0);

        // send_modify succeeds even when nobody is subscribed.
        sender.send_modify(|version| *version = version.wrapping_add(1));
        trace!(table, version = *sender.borrow(), "Table changed");
    }

    /// Subscribes to changes of `table`.
    ///
    /// The receiver's current value is the table version at subscription time.
    pub fn subscribe(&self, table: &'static str) -> watch::Receiver<u64> {
        let mut tables = self.lock();
        tables
            .entry(table)
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }

    /// Current version of `table` (0 if it never changed).
    pub fn version(&self, table: &'static str) -> u64 {
        self.lock()
            .get(table)
            .map(|sender| *sender.borrow())
            .unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, watch::Sender<u64>>> {
        // A panic while holding the lock cannot leave the map inconsistent.
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_bumps_version() {
        let tracker = ChangeTracker::new();
        assert_eq!(tracker.version("items"), 0);

        tracker.notify("items");
        tracker.notify("items");
        assert_eq!(tracker.version("items"), 2);
        assert_eq!(tracker.version("other"), 0);
    }

    #[tokio::test]
    async fn test_subscriber_is_woken() {
        let tracker = ChangeTracker::new();
        let mut rx = tracker.subscribe("items");
        assert!(!rx.has_changed().unwrap());

        tracker.notify("items");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let tracker = ChangeTracker::new();
        let clone = tracker.clone();
        clone.notify("items");
        assert_eq!(tracker.version("items"), 1);
    }
}

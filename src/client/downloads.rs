use std::io;

use chrono::Utc;

use super::cache::LocalStore;
use crate::Model::Downloads::DownloadRecord;

/// Displayed total before any download was ever recorded on this device.
pub const BASELINE: i64 = 10_482;

/// Only the most recent records are kept; older ones are evicted first.
pub const HISTORY_LIMIT: usize = 100;

/// Per-device download counter with a bounded history log. Advisory only:
/// the increment fires before the download is known to have started, and
/// totals are never reconciled across devices.
pub struct DownloadTracker {
    store: LocalStore,
}

impl DownloadTracker {
    pub fn new(store: LocalStore) -> Self {
        DownloadTracker { store }
    }

    pub fn record_download(&self) -> io::Result<i64> {
        let total = self.store.read_total().unwrap_or(BASELINE) + 1;
        self.store.write_total(total)?;

        let mut history = self.store.read_history();
        history.push(DownloadRecord {
            timestamp: Utc::now().to_rfc3339(),
            count: total,
        });

        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }

        self.store.write_history(&history)?;

        Ok(total)
    }

    pub fn total(&self) -> i64 {
        self.store.read_total().unwrap_or(BASELINE)
    }

    pub fn history(&self) -> Vec<DownloadRecord> {
        self.store.read_history()
    }

    /// Admin reset: no value clears everything back to zero, an explicit
    /// value sets the counter alone.
    pub fn reset(&self, value: Option<i64>) -> io::Result<()> {
        match value {
            Some(total) => self.store.write_total(total),
            None => {
                self.store.write_total(0)?;
                self.store.write_history(&[])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(dir: &std::path::Path) -> DownloadTracker {
        DownloadTracker::new(LocalStore::open(dir).unwrap())
    }

    #[test]
    fn first_download_starts_from_the_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(dir.path());

        assert_eq!(tracker.total(), BASELINE);

        let total = tracker.record_download().unwrap();
        assert_eq!(total, 10_483);
        assert_eq!(tracker.total(), 10_483);

        let history = tracker.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].count, 10_483);
    }

    #[test]
    fn history_is_capped_at_the_most_recent_hundred() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(dir.path());

        for _ in 0..101 {
            tracker.record_download().unwrap();
        }

        let history = tracker.history();
        assert_eq!(history.len(), HISTORY_LIMIT);

        // The first increment (10483) was evicted; the log spans the 2nd
        // through 101st.
        assert_eq!(history[0].count, 10_484);
        assert_eq!(history[HISTORY_LIMIT - 1].count, 10_583);
    }

    #[test]
    fn reset_with_value_sets_the_exact_total() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(dir.path());

        tracker.record_download().unwrap();
        tracker.reset(Some(500)).unwrap();

        assert_eq!(tracker.total(), 500);
        // History untouched by a valued reset.
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn bare_reset_zeroes_the_counter_and_clears_history() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(dir.path());

        tracker.record_download().unwrap();
        tracker.reset(None).unwrap();

        assert_eq!(tracker.total(), 0);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn rapid_increments_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(dir.path());

        for expected in 1..=5 {
            let total = tracker.record_download().unwrap();
            assert_eq!(total, BASELINE + expected);
        }
    }
}

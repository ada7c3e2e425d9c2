//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, writes and reclamation by the reaper.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of accepted `set` calls
    pub sets: u64,
    /// Number of `delete` calls that removed an entry
    pub deletes: u64,
    /// Number of expired entries physically removed by sweeps
    pub expired: u64,
    /// Number of sweep passes run
    pub sweeps: u64,
    /// Current number of stored entries, including expired ones not yet swept
    pub total_entries: usize,
    /// Wall-clock time of the most recent sweep
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Live counters owned by the store.
///
/// Read counters are atomic so lookups can record under a shared lock;
/// everything else is only touched by writers holding the exclusive lock.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: u64,
    deletes: u64,
    expired: u64,
    sweeps: u64,
    last_sweep_at: Option<DateTime<Utc>>,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&mut self) {
        self.sets += 1;
    }

    pub(crate) fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub(crate) fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.expired += removed as u64;
        self.last_sweep_at = Some(Utc::now());
    }

    // == Snapshot ==
    /// Copies the counters into a serializable snapshot.
    pub(crate) fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets,
            deletes: self.deletes,
            expired: self.expired,
            sweeps: self.sweeps,
            total_entries,
            last_sweep_at: self.last_sweep_at,
        }
    }
}

//! Cache Store Module
//!
//! Storage engine behind the cache handle: HashMap storage with TTL deadlines,
//! lazy expiry on read and a full sweep for the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, CacheValue};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Unsynchronized cache storage.
///
/// `TtlCache` wraps this in a reader/writer lock: `&self` methods run under
/// the shared lock and `&mut self` methods under the exclusive one.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Activity counters
    stats: StatsRecorder,
    /// TTL for entries set without an explicit TTL
    default_ttl: Duration,
}

impl<V: CacheValue> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries set without an explicit TTL
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsRecorder::default(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// An existing entry for the key is replaced together with its deadline.
    /// Nothing is modified when the arguments are rejected.
    ///
    /// # Arguments
    /// * `key` - Non-empty key
    /// * `value` - Value to store; must not be absent
    /// * `ttl` - Optional TTL (uses default_ttl if None)
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument(
                "key must not be empty".to_string(),
            ));
        }

        if value.is_absent() {
            return Err(CacheError::InvalidArgument(format!(
                "value for key '{}' must not be absent",
                key
            )));
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, effective_ttl));
        self.stats.record_set();

        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value if present and not expired.
    ///
    /// Expired entries are reported as missing but left in place for the
    /// next sweep.
    pub fn get(&self, key: &str) -> Option<V> {
        match self.live_entry(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains Key ==
    /// Returns true if a live entry exists for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.live_entry(key).is_some()
    }

    // == Time To Live ==
    /// Returns the remaining TTL of a live entry.
    ///
    /// `None` if the key is missing or expired, or if the entry never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.live_entry(key).and_then(CacheEntry::ttl_remaining)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true if an entry was physically removed. Deleting a missing
    /// key is a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_delete();
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes every entry whose deadline has passed.
    ///
    /// Expiry is judged against a single instant taken at the start of the
    /// pass. Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the TTL applied when `set` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn live_entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }
}

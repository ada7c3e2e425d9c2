//! TTL Cache Handle
//!
//! Thread-safe cache handle: shares a `CacheStore` behind a reader/writer lock
//! and owns the reaper task that sweeps it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, CacheValue, DEFAULT_SWEEP_INTERVAL};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_reaper, ReaperHandle};

// == TTL Cache ==
/// In-memory key/value cache with per-entry TTL and a background reaper.
///
/// Reads take a shared lock and run in parallel; writes and sweeps take the
/// exclusive lock. Share one cache between tasks with `Arc<TtlCache<V>>`.
///
/// Dropping the cache signals its reaper to exit without waiting for it;
/// call [`stop`](TtlCache::stop) to wait.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::TtlCache;
///
/// # tokio_test::block_on(async {
/// let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(3), None);
///
/// cache.set("key1", "value1".to_string(), None).await.unwrap();
/// assert_eq!(cache.get("key1").await.as_deref(), Some("value1"));
///
/// cache.stop().await;
/// # });
/// ```
#[derive(Debug)]
pub struct TtlCache<V: CacheValue> {
    store: Arc<RwLock<CacheStore<V>>>,
    reaper: Mutex<Option<ReaperHandle>>,
    sweep_interval: Duration,
}

impl<V: CacheValue> TtlCache<V> {
    // == Constructor ==
    /// Creates a cache and starts its reaper.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries set without one; zero means entries
    ///   expire immediately, `Duration::MAX` means they never expire
    /// * `sweep_interval` - Period between reaper sweeps (3 minutes if None)
    pub fn new(default_ttl: Duration, sweep_interval: Option<Duration>) -> Self {
        let sweep_interval = sweep_interval.unwrap_or(DEFAULT_SWEEP_INTERVAL);
        let store = Arc::new(RwLock::new(CacheStore::new(default_ttl)));
        let reaper = spawn_reaper(store.clone(), sweep_interval);

        debug!(
            "TTL cache created: default_ttl={:?}, sweep_interval={:?}",
            default_ttl, sweep_interval
        );

        Self {
            store,
            reaper: Mutex::new(Some(reaper)),
            sweep_interval,
        }
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.default_ttl(), Some(config.sweep_interval()))
    }

    // == Set ==
    /// Stores a value, replacing any existing entry for the key.
    ///
    /// # Errors
    /// `CacheError::InvalidArgument` if the key is empty or the value is
    /// absent. The cache is left untouched in that case.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.set(key.into(), value, ttl).map_err(|err| {
            debug!("Rejected set: {}", err);
            err
        })
    }

    // == Get ==
    /// Returns a clone of the value if present and not expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key)
    }

    // == Contains Key ==
    /// Returns true if a live entry exists for the key.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    // == Time To Live ==
    /// Returns the time left before the entry expires.
    ///
    /// `None` if the key is missing, expired or never expires.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(key)
    }

    // == Delete ==
    /// Removes the entry for the key if there is one.
    ///
    /// Returns true if an entry was physically removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Purge Expired ==
    /// Runs a sweep now, outside the reaper's schedule.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Stop ==
    /// Stops the reaper and waits for its task to exit.
    ///
    /// Calling this more than once is a no-op. The cache stays usable after
    /// stopping, but expired entries are only hidden, no longer reclaimed.
    pub async fn stop(&self) {
        // Held across the shutdown so concurrent callers wait for the task too
        let mut reaper = self.reaper.lock().await;

        if let Some(handle) = reaper.take() {
            handle.shutdown().await;
            info!("TTL cache stopped");
        }
    }

    /// Returns true until a `stop` call has finished shutting the reaper down.
    pub fn is_running(&self) -> bool {
        match self.reaper.try_lock() {
            Ok(reaper) => reaper.is_some(),
            // Only `stop` holds the lock, and it is still waiting on the task
            Err(_) => true,
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns the number of stored entries, including expired entries the
    /// reaper has not reclaimed yet.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns the TTL applied when `set` is called without one.
    pub async fn default_ttl(&self) -> Duration {
        self.store.read().await.default_ttl()
    }

    /// Returns the period between reaper sweeps.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

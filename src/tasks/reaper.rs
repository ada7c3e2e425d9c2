//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, CacheValue};

/// Shortest period the reaper will tick at. Zero periods are clamped to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Longest period the reaper will tick at (one year).
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Reaper Handle ==
/// Owner's side of a running reaper.
///
/// Dropping the handle closes the stop channel, which the task also treats
/// as a stop signal; use [`shutdown`](ReaperHandle::shutdown) to wait for it.
#[derive(Debug)]
pub struct ReaperHandle {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits until its task has exited.
    ///
    /// A sweep already in progress is allowed to finish first.
    pub async fn shutdown(self) {
        // The receiver is gone only if the task already exited
        let _ = self.stop_tx.send(());

        if let Err(err) = self.task.await {
            warn!("Reaper task ended abnormally: {}", err);
        }
    }
}

/// Spawns a background task that periodically removes expired cache entries.
///
/// The first sweep runs one `sweep_interval` after spawning. Each sweep holds
/// the store's write lock for the whole pass. If a pass overruns, one overdue
/// tick fires as soon as it finishes and any further missed ticks are
/// dropped, so passes never overlap and never pile up.
///
/// Must be called from within a tokio runtime.
///
/// # Arguments
/// * `store` - Shared reference to the cache storage
/// * `sweep_interval` - Period between sweeps
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<String>::new(Duration::from_secs(300))));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// reaper.shutdown().await;
/// ```
pub fn spawn_reaper<V: CacheValue>(
    store: Arc<RwLock<CacheStore<V>>>,
    sweep_interval: Duration,
) -> ReaperHandle {
    let period = sweep_interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!("Starting TTL reaper with interval of {:?}", period);

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                // Fires on an explicit stop and when the handle is dropped
                _ = &mut stop_rx => break,

                _ = ticker.tick() => {
                    let removed = {
                        let mut store_guard = store.write().await;
                        store_guard.cleanup_expired()
                    };

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
            }
        }

        info!("TTL reaper stopped");
    });

    ReaperHandle { stop_tx, task }
}

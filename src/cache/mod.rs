//! Cache Module
//!
//! Provides an in-memory key/value cache with TTL expiration, checked lazily
//! on read and reclaimed by a background reaper.

mod entry;
mod stats;
mod store;
mod ttl_cache;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::TtlCache;
pub use value::CacheValue;

// == Public Constants ==
/// Sweep interval used when none is given
pub const DEFAULT_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3 * 60);

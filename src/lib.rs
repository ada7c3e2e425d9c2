//! TTL Cache - An in-memory key/value cache with time-based expiry
//!
//! Entries expire a fixed time after they are written. Expired entries are
//! hidden from reads immediately and physically removed by a background
//! reaper task that runs until the cache is stopped.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, CacheValue, TtlCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};

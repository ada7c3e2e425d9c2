//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Reaper: Removes expired cache entries at a fixed interval until stopped

mod reaper;

pub use reaper::{spawn_reaper, ReaperHandle, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};

//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry deadline.
///
/// Deadlines are taken from tokio's monotonic clock, so a paused test runtime
/// controls expiry exactly.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion instant
    pub created_at: Instant,
    /// Expiration instant, None = the deadline overflowed the clock (never expires)
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` after now.
    ///
    /// A zero `ttl` produces an entry that is already expired. A `ttl` too
    /// large to add to the current instant (e.g. `Duration::MAX`) produces an
    /// entry that never expires.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::inserted_at(value, ttl, Instant::now())
    }

    /// Creates an entry as if inserted at `now`.
    pub fn inserted_at(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a fixed instant.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// an entry becomes invisible the moment its TTL has fully elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry hasn't expired yet
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

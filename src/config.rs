//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default TTL in seconds for entries set without an explicit TTL
    pub default_ttl_secs: u64,
    /// Reaper sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Reaper interval in seconds (default: 180)
    pub fn from_env() -> Self {
        Self::from_env_or(Self::default())
    }

    /// Loads values from environment variables, falling back to `defaults`
    /// for anything unset or unparsable.
    pub fn from_env_or(defaults: Self) -> Self {
        Self {
            default_ttl_secs: env_secs("DEFAULT_TTL", defaults.default_ttl_secs),
            sweep_interval_secs: env_secs("SWEEP_INTERVAL", defaults.sweep_interval_secs),
        }
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Reaper sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 300,
            sweep_interval_secs: 180,
        }
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

//! TTL Cache demo
//!
//! Writes a key, reads it back, waits out its TTL and shows the miss.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{CacheConfig, TtlCache};

/// TTL used by the demo when `DEFAULT_TTL` is not set.
const DEMO_TTL_SECS: u64 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env_or(CacheConfig {
        default_ttl_secs: DEMO_TTL_SECS,
        ..CacheConfig::default()
    });
    info!(
        "Configuration loaded: default_ttl={}s, sweep_interval={}s",
        config.default_ttl_secs, config.sweep_interval_secs
    );

    let cache: TtlCache<String> = TtlCache::from_config(&config);

    cache.set("key1", "value1".to_string(), None).await?;

    if let Some(value) = cache.get("key1").await {
        info!("Cache hit for key1: {}", value);
    }

    // Let key1 run past its TTL
    tokio::time::sleep(config.default_ttl() + Duration::from_millis(10)).await;

    if cache.get("key1").await.is_none() {
        info!("key1 has expired from cache");
    }

    let stats = cache.stats().await;
    info!("Cache stats: {}", serde_json::to_string(&stats)?);

    cache.stop().await;
    Ok(())
}

//! Integration Tests for the TTL Cache
//!
//! Exercises the public cache handle end to end: expiry, background
//! reclamation, lifecycle and concurrent use.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;
use ttl_cache::{CacheConfig, CacheError, TtlCache};

// == Helper Functions ==

fn create_test_cache() -> TtlCache<String> {
    TtlCache::new(Duration::from_secs(3), None)
}

// == Expiry Tests ==

#[tokio::test(start_paused = true)]
async fn test_set_get_expire_scenario() {
    let cache = create_test_cache();

    cache.set("key1", "value1".to_string(), None).await.unwrap();
    assert_eq!(cache.get("key1").await.as_deref(), Some("value1"));

    sleep(Duration::from_secs(3)).await;

    assert!(cache.get("key1").await.is_none());
    cache.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_expiry_boundary() {
    let cache = create_test_cache();
    cache
        .set("key1", "value1".to_string(), Some(Duration::from_secs(2)))
        .await
        .unwrap();

    sleep(Duration::from_millis(1999)).await;
    assert!(cache.get("key1").await.is_some());

    sleep(Duration::from_millis(1)).await;
    assert!(cache.get("key1").await.is_none());
    cache.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_ttl_expires_immediately() {
    let cache = create_test_cache();

    cache
        .set("key1", "value1".to_string(), Some(Duration::ZERO))
        .await
        .unwrap();

    assert!(cache.get("key1").await.is_none());
    cache.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_max_ttl_never_expires() {
    let cache = TtlCache::new(Duration::MAX, Some(Duration::from_secs(1)));

    cache.set("forever", 1u64, None).await.unwrap();
    sleep(Duration::from_secs(60 * 60)).await;

    assert_eq!(cache.get("forever").await, Some(1));
    assert_eq!(cache.len().await, 1);
    cache.stop().await;
}

// == Reclamation Tests ==

#[tokio::test(start_paused = true)]
async fn test_background_reclamation() {
    let sweep = Duration::from_secs(1);
    let ttl = Duration::from_secs(2);
    let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(300), Some(sweep));

    cache.set("short", "v".to_string(), Some(ttl)).await.unwrap();
    cache.set("long", "v".to_string(), None).await.unwrap();
    assert_eq!(cache.len().await, 2);

    sleep(sweep + ttl).await;

    assert_eq!(cache.len().await, 1, "Expired entry should be physically removed");
    let stats = cache.stats().await;
    assert_eq!(stats.expired, 1);
    assert!(stats.sweeps >= 2);
    assert!(stats.last_sweep_at.is_some());
    cache.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_default_sweep_interval_reclaims_after_three_minutes() {
    let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1), None);
    cache.set("key1", "value1".to_string(), None).await.unwrap();

    sleep(Duration::from_secs(179)).await;
    assert_eq!(cache.len().await, 1);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(cache.len().await, 0);
    cache.stop().await;
}

// == Validation Tests ==

#[tokio::test(start_paused = true)]
async fn test_invalid_input_rejected() {
    let cache: TtlCache<serde_json::Value> = TtlCache::new(Duration::from_secs(3), None);
    cache.set("key1", json!({"n": 1}), None).await.unwrap();

    let empty_key = cache.set("", json!("value"), None).await;
    let null_value = cache.set("key1", serde_json::Value::Null, None).await;

    assert!(matches!(empty_key, Err(CacheError::InvalidArgument(_))));
    assert!(matches!(null_value, Err(CacheError::InvalidArgument(_))));
    assert_eq!(cache.get("key1").await, Some(json!({"n": 1})));
    assert_eq!(cache.len().await, 1);
    cache.stop().await;
}

// == Lifecycle Tests ==

#[tokio::test(start_paused = true)]
async fn test_concurrent_stop_calls_complete() {
    let cache = Arc::new(create_test_cache());

    let stops: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.stop().await })
        })
        .collect();
    for stop in stops {
        stop.await.unwrap();
    }

    assert!(!cache.is_running());
    cache.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_reclamation_after_stop() {
    let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1), Some(Duration::from_secs(1)));
    cache.stop().await;

    cache.set("key1", "value1".to_string(), None).await.unwrap();
    sleep(Duration::from_secs(10)).await;

    assert!(cache.get("key1").await.is_none());
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.stats().await.sweeps, 0);
}

#[tokio::test(start_paused = true)]
async fn test_from_config() {
    let cache: TtlCache<String> = TtlCache::from_config(&CacheConfig {
        default_ttl_secs: 1,
        sweep_interval_secs: 1,
    });

    cache.set("key1", "value1".to_string(), None).await.unwrap();
    sleep(Duration::from_millis(2500)).await;

    assert!(cache.is_empty().await);
    cache.stop().await;
}

// == Concurrency Tests ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sets_then_gets() {
    const N: usize = 200;
    let cache: Arc<TtlCache<usize>> = Arc::new(TtlCache::new(Duration::from_secs(60), None));

    let writers: Vec<_> = (0..N)
        .map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.set(format!("key{}", i), i, None).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let readers: Vec<_> = (0..N)
        .map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move { (i, cache.get(&format!("key{}", i)).await) })
        })
        .collect();
    for reader in readers {
        let (i, value) = reader.await.unwrap();
        assert_eq!(value, Some(i));
    }

    assert_eq!(cache.len().await, N);
    let stats = cache.stats().await;
    assert_eq!(stats.sets, N as u64);
    assert_eq!(stats.hits, N as u64);
    cache.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_writers_leave_one_value() {
    let cache: Arc<TtlCache<String>> = Arc::new(TtlCache::new(Duration::from_secs(60), None));

    let writers: Vec<_> = (0..16)
        .map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.set("shared", format!("writer{}", i), None).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let value = cache.get("shared").await.unwrap();
    let writer: usize = value.trim_start_matches("writer").parse().unwrap();
    assert!(writer < 16);
    assert_eq!(cache.len().await, 1);
    cache.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_and_writes_during_sweeps() {
    let cache: Arc<TtlCache<usize>> = Arc::new(TtlCache::new(
        Duration::from_millis(5),
        Some(Duration::from_millis(2)),
    ));

    let workers: Vec<_> = (0..8)
        .map(|w| {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("w{}-{}", w, i % 10);
                    cache.set(key.clone(), i, None).await.unwrap();
                    if let Some(value) = cache.get(&key).await {
                        assert!(value <= i);
                    }
                    if i % 7 == 0 {
                        cache.delete(&key).await;
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.await.unwrap();
    }

    cache.stop().await;
    assert!(!cache.is_running());
}

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::Result;
use crate::network::JsonSource;

struct CacheEntry {
    value: Arc<Value>,
    expires_at: Instant,
}

type Slot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

/// New keys between opportunistic sweeps of expired entries
const SWEEP_INTERVAL: usize = 64;

/// Process-wide response cache with per-entry time-to-live.
///
/// Construct once at startup and share via `Arc`. Each key has its own async
/// lock, so concurrent requests for one key trigger a single fetch.
#[derive(Default)]
pub struct ResponseCache {
    slots: Mutex<HashMap<String, Slot>>,
    inserted: AtomicUsize,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = slots.get(key) {
            return slot.clone();
        }
        if self.inserted.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            sweep(&mut slots, Instant::now());
        }
        slots.entry(key.to_string()).or_default().clone()
    }

    /// Forget `slot` after a failed fetch unless another request is waiting on it.
    fn release(&self, key: &str, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        // one reference in the map, one held by the caller
        if slots.get(key).is_some_and(|s| Arc::ptr_eq(s, slot)) && Arc::strong_count(slot) == 2 {
            slots.remove(key);
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result
    /// for `ttl`. Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref()
            && Instant::now() < cached.expires_at
        {
            debug!("Cache hit: {}", key);
            return Ok(cached.value.clone());
        }

        let value = match fetch().await {
            Ok(value) => Arc::new(value),
            Err(e) => {
                *entry = None;
                drop(entry);
                self.release(key, &slot);
                return Err(e);
            }
        };
        *entry = Some(CacheEntry {
            value: value.clone(),
            expires_at: Instant::now() + ttl,
        });
        debug!("Cached {} for {:?}", key, ttl);
        Ok(value)
    }

    /// Drop expired entries
    pub fn evict_expired(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        sweep(&mut slots, Instant::now());
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keep live entries and slots some request still holds.
fn sweep(slots: &mut HashMap<String, Slot>, now: Instant) {
    slots.retain(|_, slot| {
        if Arc::strong_count(slot) > 1 {
            return true;
        }
        match slot.try_lock() {
            Ok(entry) => entry.as_ref().is_some_and(|e| now < e.expires_at),
            Err(_) => true,
        }
    });
}

fn cache_key(source: &str, path: &str, query: &[(String, String)]) -> String {
    let mut key = format!("{}/{}", source, path.trim_start_matches('/'));
    for (i, (name, value)) in query.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

/// Fetch-with-cache wrapper around a [`JsonSource`].
///
/// Transport and decode failures are logged and surface as `None`.
pub struct CachedClient<S> {
    source: S,
    cache: Arc<ResponseCache>,
}

impl<S: JsonSource> CachedClient<S> {
    pub fn new(source: S, cache: Arc<ResponseCache>) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn get(&self, path: &str, query: &[(String, String)], ttl: Duration) -> Option<Arc<Value>> {
        let key = cache_key(self.source.name(), path, query);
        let fetched = self
            .cache
            .get_or_fetch(&key, ttl, || self.source.fetch_json(path, query))
            .await;
        match fetched {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{} request {} failed: {}", self.source.name(), path, e);
                None
            }
        }
    }

    /// Like [`get`](Self::get), decoding the document into `T`.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        ttl: Duration,
    ) -> Option<T> {
        let value = self.get(path, query, ttl).await?;
        match T::deserialize(value.as_ref()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(
                    "{} response for {} is malformed: {}",
                    self.source.name(),
                    path,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_query() {
        assert_eq!(cache_key("lxns", "/api/v0/maimai/song/list", &[]), "lxns/api/v0/maimai/song/list");
        let query = vec![
            ("username".to_string(), "alice".to_string()),
            ("b50".to_string(), "1".to_string()),
        ];
        assert_eq!(cache_key("df", "records", &query), "df/records?username=alice&b50=1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(1))
        };

        cache.get_or_fetch("k", Duration::from_secs(60), fetch).await.unwrap();
        cache.get_or_fetch("k", Duration::from_secs(60), fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.get_or_fetch("k", Duration::from_secs(60), fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_not_cached() {
        let cache = ResponseCache::new();
        let result = cache
            .get_or_fetch("k", Duration::from_secs(60), || async {
                Err(crate::error::Error::NetworkError("down".to_string()))
            })
            .await;
        assert!(result.is_err());

        let value = cache
            .get_or_fetch("k", Duration::from_secs(60), || async { Ok(Value::from(2)) })
            .await
            .unwrap();
        assert_eq!(*value, Value::from(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_expired_and_clear() {
        let cache = ResponseCache::new();
        cache
            .get_or_fetch("short", Duration::from_secs(1), || async { Ok(Value::Null) })
            .await
            .unwrap();
        cache
            .get_or_fetch("long", Duration::from_secs(100), || async { Ok(Value::Null) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.evict_expired();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_releases_slot() {
        let cache = ResponseCache::new();
        let _ = cache
            .get_or_fetch("gone", Duration::from_secs(60), || async {
                Err(crate::error::Error::NetworkError("down".to_string()))
            })
            .await;
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_keys_sweep_expired_entries() {
        let cache = ResponseCache::new();
        for i in 0..SWEEP_INTERVAL - 1 {
            cache
                .get_or_fetch(&format!("old/{}", i), Duration::from_secs(1), || async { Ok(Value::Null) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), SWEEP_INTERVAL - 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache
            .get_or_fetch("fresh", Duration::from_secs(60), || async { Ok(Value::Null) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
    }
}

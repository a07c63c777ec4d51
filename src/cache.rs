use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::location::normalize_location;

/// Current conditions go stale fast.
pub const CURRENT_TTL: Duration = Duration::from_secs(60);
pub const FORECAST_TTL: Duration = Duration::from_secs(10 * 60);

/// Key of a cached provider result: operation kind plus normalized location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Current(String),
    Forecast(String, u8),
}

impl CacheKey {
    #[must_use]
    pub fn current(location: &str) -> Self {
        CacheKey::Current(normalize_location(location))
    }

    #[must_use]
    pub fn forecast(location: &str, days: u8) -> Self {
        CacheKey::Forecast(normalize_location(location), days)
    }

    /// TTL is fixed per operation kind
    #[must_use]
    pub fn ttl(&self) -> Duration {
        match self {
            CacheKey::Current(_) => CURRENT_TTL,
            CacheKey::Forecast(..) => FORECAST_TTL,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Current(location) => write!(f, "current:{location}"),
            CacheKey::Forecast(location, days) => write!(f, "forecast:{location}:{days}"),
        }
    }
}

struct StoredEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

/// In-process cache with per-entry expiry.
///
/// Safe to share between concurrent requests. A read followed by a write is
/// not atomic: two misses on the same key both fetch, and the later write wins.
#[derive(Default)]
pub struct ExpiringCache {
    entries: RwLock<HashMap<CacheKey, StoredEntry>>,
}

impl ExpiringCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under the key's TTL.
    ///
    /// Expired entries of every key are dropped on the same write, so keys
    /// that are never read again do not accumulate.
    #[tracing::instrument(name = "put_cache", level = "debug", skip_all, fields(key = %key))]
    pub async fn put<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) {
        let now = Instant::now();
        let entry = StoredEntry {
            value: Arc::new(value),
            expires_at: now + key.ttl(),
        };
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| now < stored.expires_at);
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!("Evicted {} expired entries", swept);
        }
        entries.insert(key, entry);
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip_all, fields(key = %key))]
    pub async fn get<T: Clone + Send + Sync + 'static>(&self, key: &CacheKey) -> Option<T> {
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => {
                    tracing::debug!("Key not found");
                    return None;
                }
                Some(entry) if Instant::now() < entry.expires_at => {
                    tracing::debug!("Key found and still fresh");
                    return entry.value.downcast_ref::<T>().cloned();
                }
                Some(entry) => entry.expires_at,
            }
        };

        tracing::debug!("Key found but expired");
        let mut entries = self.entries.write().await;
        // Another request may have refreshed the entry while the lock was released.
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at == expired)
        {
            entries.remove(key);
        }
        None
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &CacheKey) {
        self.entries.write().await.remove(key);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_normalize_location() {
        assert_eq!(CacheKey::current("London"), CacheKey::current(" london "));
        assert_ne!(CacheKey::forecast("London", 1), CacheKey::forecast("London", 3));
        assert_ne!(
            CacheKey::current("London"),
            CacheKey::forecast("London", 1)
        );
        assert_eq!(CacheKey::forecast("Paris,FR", 3).to_string(), "forecast:paris,fr:3");
    }

    #[test]
    fn test_ttl_per_kind() {
        assert_eq!(CacheKey::current("x").ttl(), Duration::from_secs(60));
        assert_eq!(CacheKey::forecast("x", 2).ttl(), Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_is_fresh_until_ttl() {
        let cache = ExpiringCache::new();
        let key = CacheKey::current("Oslo");
        cache.put(key.clone(), 42_u32).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get::<u32>(&key).await, Some(42));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get::<u32>(&key).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forecast_entries_live_longer() {
        let cache = ExpiringCache::new();
        let current = CacheKey::current("Oslo");
        let forecast = CacheKey::forecast("Oslo", 3);
        cache.put(current.clone(), "now".to_string()).await;
        cache.put(forecast.clone(), "later".to_string()).await;

        tokio::time::advance(Duration::from_secs(5 * 60)).await;
        assert_eq!(cache.get::<String>(&current).await, None);
        assert_eq!(cache.get::<String>(&forecast).await.as_deref(), Some("later"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_keys_are_evicted_on_write() {
        let cache = ExpiringCache::new();
        for i in 0..1000 {
            cache
                .put(CacheKey::current(&format!("{i}.0,{i}.5")), i)
                .await;
        }
        assert_eq!(cache.len().await, 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        cache.put(CacheKey::current("Oslo"), 1).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get::<i32>(&CacheKey::current("Oslo")).await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_keeps_fresh_entries() {
        let cache = ExpiringCache::new();
        cache.put(CacheKey::current("Oslo"), 1_u8).await;
        cache.put(CacheKey::forecast("Oslo", 3), 2_u8).await;

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.put(CacheKey::current("Bergen"), 3_u8).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get::<u8>(&CacheKey::forecast("Oslo", 3)).await, Some(2));
    }

    #[tokio::test]
    async fn test_wrong_type_is_a_miss() {
        let cache = ExpiringCache::new();
        let key = CacheKey::current("Oslo");
        cache.put(key.clone(), 1_u8).await;
        assert_eq!(cache.get::<String>(&key).await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = ExpiringCache::new();
        let key = CacheKey::forecast("Oslo", 1);
        cache.put(key.clone(), 1_u8).await;
        cache.remove(&key).await;
        assert_eq!(cache.get::<u8>(&key).await, None);
    }
}

//! Time-boxed in-memory cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Key/value cache whose entries expire a fixed duration after insertion.
///
/// Eviction is lazy: an expired entry is removed by the next lookup of its
/// key (or by [`purge_expired`](Self::purge_expired)), never in the
/// background. Timestamps come from [`tokio::time::Instant`], so paused test
/// time drives expiry.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, (Instant, V)>>,
}
impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a live entry, evicting it instead if it has expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some((inserted, value)) if inserted.elapsed() <= self.ttl => return Some(value.clone()),
                Some(_) => {},
            }
        }
        let mut entries = self.entries.write().await;
        // Re-check under the write lock; another task may have refreshed it.
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() <= self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            },
            None => None,
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        self.entries.write().await.insert(key, (Instant::now(), value));
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().await.remove(key).map(|(_, value)| value)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Evicts every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (inserted, _)| inserted.elapsed() <= self.ttl);
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_lazy() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get(&"a").await, Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        // Still stored until somebody looks.
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(&"a").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.insert(1, "old").await;
        tokio::time::advance(Duration::from_secs(6)).await;
        cache.insert(2, "new").await;
        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.get(&2).await, Some("new"));
        cache.clear().await;
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_restarts_ttl() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("k", 1).await;
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.insert("k", 2).await;
        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get(&"k").await, Some(2));
        assert_eq!(cache.remove(&"k").await, Some(2));
    }
}

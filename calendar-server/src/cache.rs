use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration};

/// Values kept for a fixed time after insertion. A zero TTL disables caching.
pub struct Cache<K, V> {
    inner: RwLock<HashMap<K, Arc<V>>>,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: Default::default(),
            ttl,
        })
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Stores `value` and schedules its eviction once the TTL has passed.
    pub async fn insert(self: &Arc<Self>, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        if !self.is_enabled() {
            return value;
        }

        self.inner
            .write()
            .await
            .insert(key.clone(), Arc::clone(&value));

        // a later insert under the same key owns its own eviction
        let cache = Arc::clone(self);
        let inserted = Arc::clone(&value);
        task::spawn(async move {
            sleep(cache.ttl).await;
            let mut entries = cache.inner.write().await;
            if entries
                .get(&key)
                .is_some_and(|current| Arc::ptr_eq(current, &inserted))
            {
                entries.remove(&key);
                debug!("Evicted cache entry after {:?}", cache.ttl);
            }
        });

        value
    }

    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        if !self.is_enabled() {
            return None;
        }

        self.inner.read().await.get(key).map(Arc::clone)
    }
}

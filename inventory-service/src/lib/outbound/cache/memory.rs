//! In-process cache backend.
//!
//! Uses DashMap for concurrent access with per-key sharding. No lock spans
//! more than one key, so concurrent writers to the same item are ordered by
//! whichever `insert` or `remove` lands last.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::cache::CacheError;
use crate::domain::cache::CacheKey;
use crate::domain::cache::CacheStore;

struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an unexpired entry exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .get(&key.to_string())
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Periodically purge expired entries until the runtime shuts down.
    pub fn spawn_purge_task(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = store.len(), "Purged expired cache entries");
                }
            }
        })
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        let key = key.to_string();
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired(now) {
                tracing::trace!(key = %key, "Cache hit");
                return Ok(Some(entry.data.clone()));
            }
        }

        // Only drop the entry if it is still the expired one; a concurrent
        // set may have replaced it since the read above.
        self.entries.remove_if(&key, |_, entry| entry.is_expired(now));
        tracing::trace!(key = %key, "Cache miss");
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry {
            data: value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
        tracing::trace!(key = %key, ttl_secs = ttl.as_secs(), "Cache set");
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.remove(&key.to_string());
        tracing::trace!(key = %key, "Cache delete");
        Ok(())
    }
}

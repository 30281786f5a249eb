//! Cache port shared by the domain services.
//!
//! Entries are derived copies of Record Store data and never authoritative.
//! Two key families exist: `item:<id>` for a single item snapshot and
//! `items:all` for the full listing snapshot.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::item::models::ItemId;

/// Key of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Item(ItemId),
    AllItems,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Item(id) => write!(f, "item:{}", id),
            CacheKey::AllItems => f.write_str("items:all"),
        }
    }
}

/// Error for cache backend operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to encode cache entry {key}: {reason}")]
    Encoding { key: String, reason: String },
}

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Retrieve an unexpired entry.
    ///
    /// # Returns
    /// `None` on a miss or when the entry has expired
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store an entry that expires after `ttl`, replacing any previous value.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry. Removing an absent key is not an error.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;
}

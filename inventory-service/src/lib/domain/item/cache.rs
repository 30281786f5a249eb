//! Typed cache policy for inventory items.
//!
//! Items are stored as JSON snapshots. A snapshot that no longer decodes is
//! evicted and reported as a miss so the caller falls through to the Record
//! Store.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::cache::CacheError;
use crate::domain::cache::CacheKey;
use crate::domain::cache::CacheStore;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemDescription;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Serialize, Deserialize)]
struct ItemSnapshot {
    id: i64,
    name: String,
    description: String,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.0,
            name: item.name.as_str().to_string(),
            description: item.description.as_str().to_string(),
        }
    }
}

impl ItemSnapshot {
    fn into_item(self) -> Option<Item> {
        Some(Item {
            id: ItemId(self.id),
            name: ItemName::new(self.name).ok()?,
            description: ItemDescription::new(self.description).ok()?,
        })
    }
}

pub struct ItemCache<C: CacheStore> {
    store: Arc<C>,
    ttl: Duration,
}

impl<C: CacheStore> ItemCache<C> {
    pub fn new(store: Arc<C>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, CacheError> {
        let key = CacheKey::Item(*id);
        match self.read::<ItemSnapshot>(&key).await? {
            Some(snapshot) => self.decoded(&key, snapshot.into_item()).await,
            None => Ok(None),
        }
    }

    pub async fn put_item(&self, item: &Item) -> Result<(), CacheError> {
        self.write(&CacheKey::Item(item.id), &ItemSnapshot::from(item))
            .await
    }

    pub async fn get_listing(&self) -> Result<Option<Vec<Item>>, CacheError> {
        let key = CacheKey::AllItems;
        match self.read::<Vec<ItemSnapshot>>(&key).await? {
            Some(snapshots) => {
                let items = snapshots
                    .into_iter()
                    .map(ItemSnapshot::into_item)
                    .collect::<Option<Vec<_>>>();
                self.decoded(&key, items).await
            }
            None => Ok(None),
        }
    }

    pub async fn put_listing(&self, items: &[Item]) -> Result<(), CacheError> {
        let snapshots: Vec<ItemSnapshot> = items.iter().map(ItemSnapshot::from).collect();
        self.write(&CacheKey::AllItems, &snapshots).await
    }

    pub async fn invalidate_item(&self, id: &ItemId) -> Result<(), CacheError> {
        self.store.delete(&CacheKey::Item(*id)).await
    }

    pub async fn invalidate_listing(&self) -> Result<(), CacheError> {
        self.store.delete(&CacheKey::AllItems).await
    }

    async fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>, CacheError> {
        let Some(bytes) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Evicting undecodable cache entry");
                self.store.delete(key).await?;
                Ok(None)
            }
        }
    }

    async fn decoded<T>(&self, key: &CacheKey, value: Option<T>) -> Result<Option<T>, CacheError> {
        if value.is_none() {
            tracing::warn!(key = %key, "Evicting cache entry with invalid item fields");
            self.store.delete(key).await?;
        }
        Ok(value)
    }

    async fn write<T: Serialize>(&self, key: &CacheKey, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value).map_err(|e| CacheError::Encoding {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        self.store.set(key, bytes, self.ttl).await
    }
}

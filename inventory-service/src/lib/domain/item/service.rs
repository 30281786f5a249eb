use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::cache::CacheStore;
use crate::domain::item::cache::ItemCache;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemDraft;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;

/// Domain service for inventory items.
///
/// Reads go through the cache first and repopulate it on a miss. Writes go
/// to the repository first, then:
/// - create sets `item:<id>` and drops `items:all`
/// - update drops `item:<id>` and `items:all`, then sets `item:<id>` again
/// - delete drops `item:<id>` and `items:all`
///
/// The listing is only ever rebuilt by a read.
pub struct ItemService<IR, C>
where
    IR: ItemRepository,
    C: CacheStore,
{
    repository: Arc<IR>,
    cache: ItemCache<C>,
}

impl<IR, C> ItemService<IR, C>
where
    IR: ItemRepository,
    C: CacheStore,
{
    /// Create a new item service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Record Store implementation
    /// * `cache_store` - Cache Layer implementation
    /// * `ttl` - Lifetime of every cache entry written by this service
    pub fn new(repository: Arc<IR>, cache_store: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache: ItemCache::new(cache_store, ttl),
        }
    }

    async fn find_existing(&self, id: &ItemId) -> Result<Item, ItemError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(item_id = id.0, "Inventory item not found");
            ItemError::NotFound(*id)
        })
    }

    async fn fetch_item(&self, id: &ItemId) -> Result<Item, ItemError> {
        if let Some(item) = self.cache.get_item(id).await? {
            tracing::debug!(item_id = id.0, "Returning cached inventory item");
            return Ok(item);
        }

        let item = self.find_existing(id).await?;
        self.cache.put_item(&item).await?;
        tracing::debug!(item_id = id.0, "Inventory item fetched from database");

        Ok(item)
    }

    async fn fetch_listing(&self) -> Result<Vec<Item>, ItemError> {
        if let Some(items) = self.cache.get_listing().await? {
            tracing::debug!(count = items.len(), "Returning cached inventory items");
            return Ok(items);
        }

        let items = self.repository.list_all().await?;
        self.cache.put_listing(&items).await?;
        tracing::debug!(count = items.len(), "Inventory items fetched from database");

        Ok(items)
    }

    async fn insert_item(&self, draft: ItemDraft) -> Result<Item, ItemError> {
        let new_item = draft.validate()?;
        let item = self.repository.create(new_item).await?;

        self.cache.put_item(&item).await?;
        self.cache.invalidate_listing().await?;

        tracing::info!(item_id = item.id.0, name = item.name.as_str(), "Inventory item created");
        Ok(item)
    }

    async fn replace_item(&self, id: &ItemId, draft: ItemDraft) -> Result<Item, ItemError> {
        self.find_existing(id).await?;
        let replacement = draft.validate()?.with_id(*id);

        let item = self.repository.update(replacement).await?;

        self.cache.invalidate_item(id).await?;
        self.cache.invalidate_listing().await?;
        self.cache.put_item(&item).await?;

        tracing::info!(item_id = id.0, name = item.name.as_str(), "Inventory item updated");
        Ok(item)
    }

    async fn remove_item(&self, id: &ItemId) -> Result<(), ItemError> {
        self.find_existing(id).await?;
        self.repository.delete(id).await?;

        self.cache.invalidate_item(id).await?;
        self.cache.invalidate_listing().await?;

        tracing::info!(item_id = id.0, "Inventory item deleted");
        Ok(())
    }
}

/// Log backend failures with their operation context before they leave the
/// service.
fn report(operation: &'static str, item_id: Option<ItemId>) -> impl Fn(ItemError) -> ItemError {
    move |err| {
        if err.is_internal() {
            tracing::error!(
                operation,
                item_id = item_id.map(|id| id.0),
                error = %err,
                "Inventory operation failed"
            );
        }
        err
    }
}

#[async_trait]
impl<IR, C> ItemServicePort for ItemService<IR, C>
where
    IR: ItemRepository,
    C: CacheStore,
{
    async fn create_item(&self, draft: ItemDraft) -> Result<Item, ItemError> {
        self.insert_item(draft)
            .await
            .map_err(report("create_item", None))
    }

    async fn get_item(&self, id: &ItemId) -> Result<Item, ItemError> {
        self.fetch_item(id)
            .await
            .map_err(report("get_item", Some(*id)))
    }

    async fn list_items(&self) -> Result<Vec<Item>, ItemError> {
        self.fetch_listing()
            .await
            .map_err(report("list_items", None))
    }

    async fn update_item(&self, id: &ItemId, draft: ItemDraft) -> Result<Item, ItemError> {
        self.replace_item(id, draft)
            .await
            .map_err(report("update_item", Some(*id)))
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), ItemError> {
        self.remove_item(id)
            .await
            .map_err(report("delete_item", Some(*id)))
    }
}

use async_trait::async_trait;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemDraft;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::NewItem;

/// Port for inventory domain service operations.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// Validate and persist a new item.
    ///
    /// # Returns
    /// Created item with its assigned identifier
    ///
    /// # Errors
    /// * `Validation` - Missing or invalid fields
    /// * `DatabaseError` / `Cache` - Backend failure
    async fn create_item(&self, draft: ItemDraft) -> Result<Item, ItemError>;

    /// Retrieve one item, served from cache when possible.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist
    /// * `DatabaseError` / `Cache` - Backend failure
    async fn get_item(&self, id: &ItemId) -> Result<Item, ItemError>;

    /// Retrieve every item, served from cache when possible.
    ///
    /// # Errors
    /// * `DatabaseError` / `Cache` - Backend failure
    async fn list_items(&self) -> Result<Vec<Item>, ItemError>;

    /// Replace name and description of an existing item.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist (checked before validation)
    /// * `Validation` - Missing or invalid fields
    /// * `DatabaseError` / `Cache` - Backend failure
    async fn update_item(&self, id: &ItemId, draft: ItemDraft) -> Result<Item, ItemError>;

    /// Delete an existing item.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist
    /// * `DatabaseError` / `Cache` - Backend failure
    async fn delete_item(&self, id: &ItemId) -> Result<(), ItemError>;
}

/// Persistence operations for inventory items (the Record Store).
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Insert a new item, letting storage assign its identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, item: NewItem) -> Result<Item, ItemError>;

    /// Retrieve item by identifier.
    ///
    /// # Returns
    /// Optional item (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError>;

    /// Retrieve all items ordered by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Item>, ItemError>;

    /// Overwrite name and description of an existing item.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, item: Item) -> Result<Item, ItemError>;

    /// Remove item from storage.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ItemId) -> Result<(), ItemError>;
}

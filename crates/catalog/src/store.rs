use async_trait::async_trait;
use common::ItemId;

use crate::error::Result;
use crate::item::{CatalogItem, NewCatalogItem};

/// Core trait for catalog item persistence.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts a new item, assigning its id.
    async fn insert(&self, new_item: NewCatalogItem) -> Result<CatalogItem>;

    /// Retrieves an item. Returns `None` if no item exists with the id.
    async fn find(&self, item_id: ItemId) -> Result<Option<CatalogItem>>;

    /// Retrieves every item, ordered by id.
    async fn find_all(&self) -> Result<Vec<CatalogItem>>;

    /// Retrieves the items filed under a category.
    async fn find_by_category(&self, category: &str) -> Result<Vec<CatalogItem>>;

    /// Overwrites an existing item's fields.
    ///
    /// Returns `None` when no item exists with the id.
    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>>;

    /// Deletes an item. Returns whether a row was removed.
    async fn delete(&self, item_id: ItemId) -> Result<bool>;

    /// Deletes every item in a category, returning how many were removed.
    async fn delete_by_category(&self, category: &str) -> Result<u64>;
}

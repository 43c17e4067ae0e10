use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ItemId;
use tokio::sync::RwLock;

use crate::error::{CatalogError, Result};
use crate::item::{CatalogItem, NewCatalogItem};
use crate::store::CatalogStore;

#[derive(Default)]
struct InMemoryCatalogState {
    items: HashMap<ItemId, CatalogItem>,
    fail_on_delete: bool,
}

/// In-memory catalog item store.
///
/// Default backend for tests and local runs. The delete fail switch lets
/// tests drive the provisioning rollback into its failure path, which a
/// healthy store never takes.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures deletes to fail with a database error.
    pub async fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().await.fail_on_delete = fail;
    }

    /// Returns the number of stored items.
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert(&self, new_item: NewCatalogItem) -> Result<CatalogItem> {
        let item = new_item.into_item();
        let mut state = self.state.write().await;
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find(&self, item_id: ItemId) -> Result<Option<CatalogItem>> {
        Ok(self.state.read().await.items.get(&item_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<CatalogItem>> {
        let state = self.state.read().await;
        let mut all: Vec<CatalogItem> = state.items.values().cloned().collect();
        all.sort_by_key(|item| item.id.as_uuid());
        Ok(all)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<CatalogItem>> {
        let state = self.state.read().await;
        let mut matching: Vec<CatalogItem> = state
            .items
            .values()
            .filter(|item| item.category == category)
            .cloned()
            .collect();
        matching.sort_by_key(|item| item.id.as_uuid());
        Ok(matching)
    }

    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>> {
        let mut state = self.state.write().await;
        match state.items.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.fail_on_delete {
            return Err(CatalogError::Database(sqlx::Error::PoolClosed));
        }
        Ok(state.items.remove(&item_id).is_some())
    }

    async fn delete_by_category(&self, category: &str) -> Result<u64> {
        let mut state = self.state.write().await;
        if state.fail_on_delete {
            return Err(CatalogError::Database(sqlx::Error::PoolClosed));
        }
        let before = state.items.len();
        state.items.retain(|_, item| item.category != category);
        Ok((before - state.items.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    fn widget(category: &str) -> NewCatalogItem {
        NewCatalogItem::new("Widget", Money::from_cents(999), category)
    }

    #[tokio::test]
    async fn insert_assigns_a_fresh_id() {
        let store = InMemoryCatalogStore::new();

        let a = store.insert(widget("tools")).await.unwrap();
        let b = store.insert(widget("tools")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.find(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn update_returns_none_for_unknown_items() {
        let store = InMemoryCatalogStore::new();
        let item = widget("tools").into_item();

        assert!(store.update(item).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_category_filters() {
        let store = InMemoryCatalogStore::new();
        store.insert(widget("tools")).await.unwrap();
        store.insert(widget("tools")).await.unwrap();
        store.insert(widget("toys")).await.unwrap();

        assert_eq!(store.find_by_category("tools").await.unwrap().len(), 2);
        assert_eq!(store.find_by_category("toys").await.unwrap().len(), 1);
        assert!(store.find_by_category("food").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_by_category_reports_removed_count() {
        let store = InMemoryCatalogStore::new();
        store.insert(widget("tools")).await.unwrap();
        store.insert(widget("tools")).await.unwrap();
        store.insert(widget("toys")).await.unwrap();

        assert_eq!(store.delete_by_category("tools").await.unwrap(), 2);
        assert_eq!(store.item_count().await, 1);
        assert_eq!(store.delete_by_category("tools").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn fail_switch_turns_deletes_into_errors() {
        let store = InMemoryCatalogStore::new();
        let item = store.insert(widget("tools")).await.unwrap();
        store.set_fail_on_delete(true).await;

        let err = store.delete(item.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
        assert_eq!(store.item_count().await, 1);
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ItemId;
use tokio::sync::RwLock;

use crate::error::{InventoryError, Result};
use crate::level::StockLevel;
use crate::store::{DecrementOutcome, InventoryStore};

/// In-memory stock level store.
///
/// Default backend for tests and local runs. Provides the same interface
/// and the same decrement atomicity as the PostgreSQL implementation: the
/// check and the subtraction happen under one write lock.
#[derive(Clone, Default)]
pub struct InMemoryInventoryStore {
    levels: Arc<RwLock<HashMap<ItemId, i32>>>,
}

impl InMemoryInventoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn insert(&self, level: StockLevel) -> Result<StockLevel> {
        let mut levels = self.levels.write().await;
        if levels.contains_key(&level.item_id) {
            return Err(InventoryError::Duplicate(level.item_id));
        }
        levels.insert(level.item_id, level.quantity);
        Ok(level)
    }

    async fn find(&self, item_id: ItemId) -> Result<Option<StockLevel>> {
        let levels = self.levels.read().await;
        Ok(levels
            .get(&item_id)
            .map(|&quantity| StockLevel::new(item_id, quantity)))
    }

    async fn find_all(&self) -> Result<Vec<StockLevel>> {
        let levels = self.levels.read().await;
        let mut all: Vec<StockLevel> = levels
            .iter()
            .map(|(&item_id, &quantity)| StockLevel::new(item_id, quantity))
            .collect();
        all.sort_by_key(|level| level.item_id.as_uuid());
        Ok(all)
    }

    async fn update(&self, level: StockLevel) -> Result<Option<StockLevel>> {
        let mut levels = self.levels.write().await;
        match levels.get_mut(&level.item_id) {
            Some(quantity) => {
                *quantity = level.quantity;
                Ok(Some(level))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        Ok(self.levels.write().await.remove(&item_id).is_some())
    }

    async fn decrement(&self, item_id: ItemId, amount: i32) -> Result<DecrementOutcome> {
        // One write lock spans the check and the subtraction.
        let mut levels = self.levels.write().await;
        match levels.get_mut(&item_id) {
            None => Ok(DecrementOutcome::NotFound),
            Some(quantity) if *quantity < amount => Ok(DecrementOutcome::Insufficient {
                available: *quantity,
            }),
            Some(quantity) => {
                *quantity -= amount;
                Ok(DecrementOutcome::Applied(StockLevel::new(
                    item_id, *quantity,
                )))
            }
        }
    }
}

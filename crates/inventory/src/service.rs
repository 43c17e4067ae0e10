//! Validation layer over the stock level stores.

use common::ItemId;

use crate::error::{InventoryError, Result};
use crate::level::StockLevel;
use crate::store::{DecrementOutcome, InventoryStore};

/// Stock level operations with input validation.
///
/// Quantities are validated here, so store implementations can assume
/// non-negative levels and positive decrement amounts.
#[derive(Clone)]
pub struct InventoryService<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a stock level for an item that has none yet.
    #[tracing::instrument(skip(self))]
    pub async fn add_level(&self, level: StockLevel) -> Result<StockLevel> {
        if level.quantity < 0 {
            return Err(InventoryError::NegativeQuantity(level.quantity));
        }
        self.store.insert(level).await
    }

    /// Returns the level for an item, if one exists.
    pub async fn level(&self, item_id: ItemId) -> Result<Option<StockLevel>> {
        self.store.find(item_id).await
    }

    /// Returns every stored level.
    pub async fn all_levels(&self) -> Result<Vec<StockLevel>> {
        self.store.find_all().await
    }

    /// Overwrites an existing level. Returns `None` when the item has no
    /// level to update.
    #[tracing::instrument(skip(self))]
    pub async fn update_level(&self, level: StockLevel) -> Result<Option<StockLevel>> {
        if level.quantity < 0 {
            return Err(InventoryError::NegativeQuantity(level.quantity));
        }
        self.store.update(level).await
    }

    /// Removes an item's level. Returns whether one existed.
    #[tracing::instrument(skip(self))]
    pub async fn remove_level(&self, item_id: ItemId) -> Result<bool> {
        self.store.delete(item_id).await
    }

    /// Atomically subtracts `amount` from the item's level.
    #[tracing::instrument(skip(self))]
    pub async fn decrement(&self, item_id: ItemId, amount: i32) -> Result<DecrementOutcome> {
        if amount < 1 {
            return Err(InventoryError::InvalidDecrement(amount));
        }

        let outcome = self.store.decrement(item_id, amount).await?;
        if let DecrementOutcome::Insufficient { available } = outcome {
            tracing::warn!(%item_id, amount, available, "decrement rejected, insufficient stock");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryInventoryStore;

    fn service() -> InventoryService<InMemoryInventoryStore> {
        InventoryService::new(InMemoryInventoryStore::new())
    }

    #[tokio::test]
    async fn add_level_rejects_negative_quantities() {
        let service = service();
        let err = service
            .add_level(StockLevel::new(ItemId::new(), -1))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NegativeQuantity(-1)));
    }

    #[tokio::test]
    async fn update_level_rejects_negative_quantities() {
        let service = service();
        let item_id = ItemId::new();
        service.add_level(StockLevel::new(item_id, 5)).await.unwrap();

        let err = service
            .update_level(StockLevel::new(item_id, -3))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NegativeQuantity(-3)));
        assert_eq!(
            service.level(item_id).await.unwrap(),
            Some(StockLevel::new(item_id, 5))
        );
    }

    #[tokio::test]
    async fn decrement_rejects_non_positive_amounts() {
        let service = service();
        let item_id = ItemId::new();
        service.add_level(StockLevel::new(item_id, 5)).await.unwrap();

        for amount in [0, -2] {
            let err = service.decrement(item_id, amount).await.unwrap_err();
            assert!(matches!(err, InventoryError::InvalidDecrement(a) if a == amount));
        }
        assert_eq!(
            service.level(item_id).await.unwrap(),
            Some(StockLevel::new(item_id, 5))
        );
    }

    #[tokio::test]
    async fn decrement_passes_valid_amounts_to_the_store() {
        let service = service();
        let item_id = ItemId::new();
        service.add_level(StockLevel::new(item_id, 5)).await.unwrap();

        let outcome = service.decrement(item_id, 2).await.unwrap();
        assert_eq!(
            outcome,
            DecrementOutcome::Applied(StockLevel::new(item_id, 3))
        );
    }

    #[tokio::test]
    async fn zero_quantity_levels_are_allowed() {
        let service = service();
        let item_id = ItemId::new();

        let level = service.add_level(StockLevel::new(item_id, 0)).await.unwrap();
        assert_eq!(level.quantity, 0);
    }
}

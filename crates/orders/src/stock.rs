//! Advisory stock check ahead of order placement.

use common::{CorrelationId, ItemId};
use remote::InventoryClient;

/// Fail-closed read of the inventory level.
///
/// Answers whether at least the requested number of units is on hand right
/// now. A missing record and an unreachable inventory service both count
/// as no. The gate makes no reservation; the conditional decrement after
/// persistence is the authoritative check.
#[derive(Clone)]
pub struct StockGate<I> {
    inventory: I,
}

impl<I: InventoryClient> StockGate<I> {
    /// Creates a gate over the given inventory client.
    pub fn new(inventory: I) -> Self {
        Self { inventory }
    }

    /// Returns whether the item currently holds at least `requested` units.
    pub async fn has_stock(
        &self,
        item_id: ItemId,
        requested: i32,
        correlation: &CorrelationId,
    ) -> bool {
        match self.inventory.fetch_level(item_id, correlation).await {
            Ok(Some(level)) => level.quantity >= requested,
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(
                    %item_id,
                    error = %err,
                    "stock lookup failed, treating item as out of stock"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote::InMemoryInventoryClient;

    #[tokio::test]
    async fn passes_when_enough_stock_is_on_hand() {
        let inventory = InMemoryInventoryClient::new();
        let item_id = ItemId::new();
        inventory.set_level(item_id, 10);
        let gate = StockGate::new(inventory);

        assert!(gate.has_stock(item_id, 9, &CorrelationId::generate()).await);
        assert!(gate.has_stock(item_id, 10, &CorrelationId::generate()).await);
    }

    #[tokio::test]
    async fn blocks_when_stock_is_short() {
        let inventory = InMemoryInventoryClient::new();
        let item_id = ItemId::new();
        inventory.set_level(item_id, 3);
        let gate = StockGate::new(inventory);

        assert!(!gate.has_stock(item_id, 4, &CorrelationId::generate()).await);
    }

    #[tokio::test]
    async fn blocks_items_without_a_stock_record() {
        let gate = StockGate::new(InMemoryInventoryClient::new());
        assert!(
            !gate
                .has_stock(ItemId::new(), 1, &CorrelationId::generate())
                .await
        );
    }

    #[tokio::test]
    async fn blocks_when_the_inventory_service_is_down() {
        let inventory = InMemoryInventoryClient::new();
        let item_id = ItemId::new();
        inventory.set_level(item_id, 10);
        inventory.set_fail_on_fetch(true);
        let gate = StockGate::new(inventory);

        assert!(!gate.has_stock(item_id, 1, &CorrelationId::generate()).await);
    }
}

use async_trait::async_trait;
use common::ItemId;

use crate::error::Result;
use crate::level::StockLevel;

/// Outcome of a conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// The subtraction was applied; carries the new level.
    Applied(StockLevel),
    /// The item holds fewer units than requested. Nothing was changed.
    Insufficient {
        /// Units on hand at the time of the attempt.
        available: i32,
    },
    /// No stock level exists for the item.
    NotFound,
}

/// Core trait for stock level persistence.
///
/// All implementations must be thread-safe (Send + Sync), and must make
/// `decrement`'s check-and-subtract a single atomic step: two racing
/// decrements may each observe enough stock, but only the one the store
/// applies first can take the last units.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Inserts a new stock level.
    ///
    /// Fails with [`InventoryError::Duplicate`](crate::InventoryError::Duplicate)
    /// when a level already exists for the item.
    async fn insert(&self, level: StockLevel) -> Result<StockLevel>;

    /// Retrieves the level for an item.
    ///
    /// Returns `None` if no level exists.
    async fn find(&self, item_id: ItemId) -> Result<Option<StockLevel>>;

    /// Retrieves every stored level, ordered by item id.
    async fn find_all(&self) -> Result<Vec<StockLevel>>;

    /// Overwrites an existing level.
    ///
    /// Returns `None` when no level exists for the item.
    async fn update(&self, level: StockLevel) -> Result<Option<StockLevel>>;

    /// Deletes a level. Returns whether a row was removed.
    async fn delete(&self, item_id: ItemId) -> Result<bool>;

    /// Atomically subtracts `amount` if at least that much is on hand.
    async fn decrement(&self, item_id: ItemId, amount: i32) -> Result<DecrementOutcome>;
}

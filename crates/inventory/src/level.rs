//! Stock level domain type.

use common::ItemId;
use serde::{Deserialize, Serialize};

/// Units on hand for one item.
///
/// The id is the catalog item's id; provisioning creates the level under
/// the same identifier the catalog assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Item the level belongs to.
    pub item_id: ItemId,
    /// Units on hand, never negative once past validation.
    pub quantity: i32,
}

impl StockLevel {
    /// Creates a stock level.
    pub fn new(item_id: ItemId, quantity: i32) -> Self {
        Self { item_id, quantity }
    }
}

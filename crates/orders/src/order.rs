//! Order domain types.

use common::{ItemId, Money, OrderId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// A customer order with its price snapshot.
///
/// `price_per_unit` is captured from the catalog when the order is placed
/// and never refreshed; later catalog price changes do not touch existing
/// orders. `total_price` is always `quantity` times the captured unit
/// price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: OrderId,
    /// The ordered catalog item.
    pub item_id: ItemId,
    /// Units ordered, at least 1.
    pub quantity: i32,
    /// Unit price at the time the order was placed.
    pub price_per_unit: Money,
    /// Quantity times the captured unit price.
    pub total_price: Money,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// How to reach the customer.
    pub contact: String,
}

/// A validated order the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// The ordered catalog item.
    pub item_id: ItemId,
    /// Units ordered.
    pub quantity: i32,
    /// Captured unit price.
    pub price_per_unit: Money,
    /// Quantity times unit price.
    pub total_price: Money,
    /// Initial status.
    pub status: OrderStatus,
    /// How to reach the customer.
    pub contact: String,
}

impl NewOrder {
    /// Attaches a fresh id, producing the order to persist.
    pub fn into_order(self) -> Order {
        Order {
            id: OrderId::new(),
            item_id: self.item_id,
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            total_price: self.total_price,
            status: self.status,
            contact: self.contact,
        }
    }
}

/// Unvalidated order fields as they arrive on the wire.
///
/// The status travels as a raw string so that unknown values are rejected
/// by the service with a validation error rather than a deserialization
/// failure. Placement turns a draft into a [`NewOrder`]; updates apply a
/// draft over an existing order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    /// The catalog item to order.
    pub item_id: ItemId,
    /// Units to order.
    pub quantity: i32,
    /// Requested status, as its wire string.
    pub status: String,
    /// How to reach the customer.
    pub contact: String,
}

impl OrderDraft {
    /// Creates a draft.
    pub fn new(item_id: ItemId, quantity: i32, status: &str, contact: &str) -> Self {
        Self {
            item_id,
            quantity,
            status: status.to_string(),
            contact: contact.to_string(),
        }
    }
}

//! Error types for the orders service.

use common::{ItemId, OrderId};
use remote::RemoteError;
use thiserror::Error;

use crate::status::OrderStatus;

/// Rejected order input. Raised before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The status string is not one of the known statuses.
    #[error("{0:?} is not a known order status")]
    UnknownStatus(String),

    /// Orders can only enter the system in the initial status.
    #[error("orders must be created with status 'new', got '{0}'")]
    NotCreatable(OrderStatus),

    /// Orders are for at least one unit.
    #[error("order quantity must be at least 1, got {0}")]
    QuantityTooSmall(i32),
}

/// Errors that can occur while placing or managing orders.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The order input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The catalog has no item with the referenced id.
    #[error("catalog has no item {0}")]
    ItemUnknown(ItemId),

    /// The inventory holds fewer units than the order asks for.
    #[error("item {item_id} is not in stock for a quantity of {requested}")]
    InsufficientStock {
        /// The item the order asked for.
        item_id: ItemId,
        /// How many units the order asked for.
        requested: i32,
    },

    /// A call to a peer service failed.
    #[error("downstream call failed: {0}")]
    Downstream(#[from] RemoteError),

    /// The order row was written but the stock decrement was not applied.
    /// The order stays in place; the inventory has to be corrected by hand.
    #[error(
        "manual intervention required: order {order_id} was created but the stock \
         decrement of {quantity} for item {item_id} was not applied: {cause}"
    )]
    StockNotAdjusted {
        /// The order that was persisted.
        order_id: OrderId,
        /// The item whose stock is now out of step.
        item_id: ItemId,
        /// The decrement that never landed.
        quantity: i32,
        /// What went wrong on the inventory side.
        #[source]
        cause: RemoteError,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for orders operations.
pub type Result<T> = std::result::Result<T, OrdersError>;

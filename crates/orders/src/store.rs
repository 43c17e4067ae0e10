//! Storage trait for orders.

use async_trait::async_trait;
use common::OrderId;

use crate::error::Result;
use crate::order::{NewOrder, Order};
use crate::status::OrderStatus;

/// Abstraction over order storage backends.
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Persists a new order, assigning its id, and returns the stored row.
    async fn insert(&self, new_order: NewOrder) -> Result<Order>;

    /// Retrieves an order by id. Returns `None` when absent.
    async fn find(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Retrieves all orders, ordered by id.
    async fn find_all(&self) -> Result<Vec<Order>>;

    /// Retrieves the orders currently in the given status, ordered by id.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>>;

    /// Overwrites an existing order. Returns `None` when no order with the
    /// id exists; nothing is inserted in that case.
    async fn update(&self, order: Order) -> Result<Option<Order>>;

    /// Deletes an order. Returns whether a row was removed.
    async fn delete(&self, order_id: OrderId) -> Result<bool>;
}

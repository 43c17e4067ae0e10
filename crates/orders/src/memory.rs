use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::order::{NewOrder, Order};
use crate::status::OrderStatus;
use crate::store::OrdersStore;

/// In-memory order store for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryOrdersStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrdersStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersStore for InMemoryOrdersStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order> {
        let order = new_order.into_order();
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(|order| order.id.as_uuid());
        Ok(all)
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| order.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|order| order.id.as_uuid());
        Ok(matching)
    }

    async fn update(&self, order: Order) -> Result<Option<Order>> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, order_id: OrderId) -> Result<bool> {
        Ok(self.orders.write().await.remove(&order_id).is_some())
    }
}

//! Order operations, including the placement flow against catalog and
//! inventory.

use common::{CorrelationId, OrderId};
use remote::{CatalogClient, InventoryClient};

use crate::error::{OrdersError, Result, ValidationError};
use crate::order::{NewOrder, Order, OrderDraft};
use crate::status::OrderStatus;
use crate::stock::StockGate;
use crate::store::OrdersStore;

/// Order operations over a store and the catalog and inventory peers.
///
/// Placement validates locally first, reads the catalog and the stock
/// gate, persists the order and finally takes the stock through the
/// conditional decrement. The decrement is the only step after the write;
/// when it fails the order stays in place and the caller is told the
/// stock was not adjusted.
#[derive(Clone)]
pub struct OrdersService<S, I, C>
where
    S: OrdersStore,
    I: InventoryClient + Clone,
    C: CatalogClient,
{
    store: S,
    inventory: I,
    gate: StockGate<I>,
    catalog: C,
}

impl<S, I, C> OrdersService<S, I, C>
where
    S: OrdersStore,
    I: InventoryClient + Clone,
    C: CatalogClient,
{
    /// Creates a service over the given store and peer clients.
    pub fn new(store: S, inventory: I, catalog: C) -> Self {
        let gate = StockGate::new(inventory.clone());
        Self {
            store,
            inventory,
            gate,
            catalog,
        }
    }

    /// Runs the order placement flow end to end.
    ///
    /// Validation failures happen before any remote call. The unit price
    /// is captured from the catalog and frozen into the order. A decrement
    /// failure after persistence surfaces as
    /// [`OrdersError::StockNotAdjusted`] carrying the persisted order id;
    /// the order is not rolled back.
    #[tracing::instrument(skip(self, draft), fields(item_id = %draft.item_id))]
    pub async fn create_order(
        &self,
        draft: OrderDraft,
        correlation: &CorrelationId,
    ) -> Result<Order> {
        let start = std::time::Instant::now();

        // 1. The status must parse and be the creation status.
        let status: OrderStatus = draft.status.parse()?;
        if !status.is_valid_for_creation() {
            return Err(ValidationError::NotCreatable(status).into());
        }

        // 2. Orders are for at least one unit.
        if draft.quantity < 1 {
            return Err(ValidationError::QuantityTooSmall(draft.quantity).into());
        }

        // 3. Capture the unit price from the catalog.
        let item = self
            .catalog
            .fetch_item(draft.item_id, correlation)
            .await?
            .ok_or(OrdersError::ItemUnknown(draft.item_id))?;
        let price_per_unit = item.price_per_unit();
        let total_price = price_per_unit.multiply(i64::from(draft.quantity));

        // 4. Advisory stock check before anything is written.
        if !self
            .gate
            .has_stock(draft.item_id, draft.quantity, correlation)
            .await
        {
            metrics::counter!("orders_rejected_out_of_stock_total").increment(1);
            return Err(OrdersError::InsufficientStock {
                item_id: draft.item_id,
                requested: draft.quantity,
            });
        }

        // 5. Persist the order.
        let order = self
            .store
            .insert(NewOrder {
                item_id: draft.item_id,
                quantity: draft.quantity,
                price_per_unit,
                total_price,
                status,
                contact: draft.contact,
            })
            .await?;

        // 6. Take the stock. The decrement re-checks the level atomically
        // on the inventory side, so two racing orders cannot both win the
        // last units.
        match self
            .inventory
            .decrement_level(order.item_id, order.quantity, correlation)
            .await
        {
            Ok(level) => {
                tracing::info!(
                    order_id = %order.id,
                    remaining = level.quantity,
                    "order created"
                );
                metrics::counter!("orders_created_total").increment(1);
                metrics::histogram!("order_fulfillment_duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                Ok(order)
            }
            Err(cause) => {
                tracing::error!(
                    order_id = %order.id,
                    error = %cause,
                    "order persisted but stock decrement failed"
                );
                metrics::counter!("orders_fulfillment_failed_total").increment(1);
                Err(OrdersError::StockNotAdjusted {
                    order_id: order.id,
                    item_id: order.item_id,
                    quantity: order.quantity,
                    cause,
                })
            }
        }
    }

    /// Returns an order, if one exists with the id.
    pub async fn order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.store.find(order_id).await
    }

    /// Returns every order.
    pub async fn all_orders(&self) -> Result<Vec<Order>> {
        self.store.find_all().await
    }

    /// Returns the orders currently in the given status.
    ///
    /// The raw string is validated first; an unknown status is rejected
    /// rather than silently matching nothing.
    pub async fn orders_with_status(&self, status: &str) -> Result<Vec<Order>> {
        let status: OrderStatus = status.parse()?;
        self.store.find_by_status(status).await
    }

    /// Overwrites an order's fields with a validated draft.
    ///
    /// The status only has to be a known member; any transition is
    /// accepted. The captured unit price is preserved and the total
    /// recomputed from it. No remote calls are made.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update_order(&self, order_id: OrderId, draft: OrderDraft) -> Result<Option<Order>> {
        let status: OrderStatus = draft.status.parse()?;

        let Some(existing) = self.store.find(order_id).await? else {
            return Ok(None);
        };

        let total_price = existing.price_per_unit.multiply(i64::from(draft.quantity));
        self.store
            .update(Order {
                id: existing.id,
                item_id: draft.item_id,
                quantity: draft.quantity,
                price_per_unit: existing.price_per_unit,
                total_price,
                status,
                contact: draft.contact,
            })
            .await
    }

    /// Deletes an order. Returns whether one existed.
    pub async fn delete_order(&self, order_id: OrderId) -> Result<bool> {
        self.store.delete(order_id).await
    }
}

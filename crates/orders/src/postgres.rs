use std::str::FromStr;

use async_trait::async_trait;
use common::{ItemId, Money, OrderId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::Result;
use crate::order::{NewOrder, Order};
use crate::status::OrderStatus;
use crate::store::OrdersStore;

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrdersStore {
    pool: PgPool,
}

impl PostgresOrdersStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;
        // A status the enum cannot parse is a corrupt row, reported as a
        // decode failure.
        let status =
            OrderStatus::from_str(&status).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            item_id: ItemId::from_uuid(row.try_get::<Uuid, _>("item_id")?),
            quantity: row.try_get("quantity")?,
            price_per_unit: Money::from_cents(row.try_get("price_per_unit_cents")?),
            total_price: Money::from_cents(row.try_get("total_price_cents")?),
            status,
            contact: row.try_get("contact")?,
        })
    }
}

#[async_trait]
impl OrdersStore for PostgresOrdersStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order> {
        let order = new_order.into_order();
        sqlx::query(
            "INSERT INTO orders \
             (id, item_id, quantity, price_per_unit_cents, total_price_cents, status, contact) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(order.id.as_uuid())
        .bind(order.item_id.as_uuid())
        .bind(order.quantity)
        .bind(order.price_per_unit.cents())
        .bind(order.total_price.cents())
        .bind(order.status.as_str())
        .bind(&order.contact)
        .execute(&self.pool)
        .await?;
        Ok(order)
    }

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, item_id, quantity, price_per_unit_cents, total_price_cents, status, \
             contact FROM orders WHERE id = $1",
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_order).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, item_id, quantity, price_per_unit_cents, total_price_cents, status, \
             contact FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, item_id, quantity, price_per_unit_cents, total_price_cents, status, \
             contact FROM orders WHERE status = $1 ORDER BY id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn update(&self, order: Order) -> Result<Option<Order>> {
        let result = sqlx::query(
            "UPDATE orders SET item_id = $2, quantity = $3, price_per_unit_cents = $4, \
             total_price_cents = $5, status = $6, contact = $7 WHERE id = $1",
        )
        .bind(order.id.as_uuid())
        .bind(order.item_id.as_uuid())
        .bind(order.quantity)
        .bind(order.price_per_unit.cents())
        .bind(order.total_price.cents())
        .bind(order.status.as_str())
        .bind(&order.contact)
        .execute(&self.pool)
        .await?;
        Ok((result.rows_affected() > 0).then_some(order))
    }

    async fn delete(&self, order_id: OrderId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

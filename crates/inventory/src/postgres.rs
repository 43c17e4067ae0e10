use async_trait::async_trait;
use common::ItemId;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{InventoryError, Result};
use crate::level::StockLevel;
use crate::store::{DecrementOutcome, InventoryStore};

/// PostgreSQL-backed stock level store.
#[derive(Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    /// Creates a new PostgreSQL stock level store.
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

    fn row_to_level(row: PgRow) -> Result<StockLevel> {
        Ok(StockLevel::new(
            ItemId::from_uuid(row.try_get::<Uuid, _>("item_id")?),
            row.try_get("quantity")?,
        ))
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    async fn insert(&self, level: StockLevel) -> Result<StockLevel> {
        sqlx::query("INSERT INTO stock_levels (item_id, quantity) VALUES ($1, $2)")
            .bind(level.item_id.as_uuid())
            .bind(level.quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("stock_levels_pkey")
                {
                    return InventoryError::Duplicate(level.item_id);
                }
                e.into()
            })?;
        Ok(level)
    }

    async fn find(&self, item_id: ItemId) -> Result<Option<StockLevel>> {
        let row = sqlx::query("SELECT item_id, quantity FROM stock_levels WHERE item_id = $1")
            .bind(item_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_level).transpose()
    }

    async fn find_all(&self) -> Result<Vec<StockLevel>> {
        let rows = sqlx::query("SELECT item_id, quantity FROM stock_levels ORDER BY item_id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_level).collect()
    }

    async fn update(&self, level: StockLevel) -> Result<Option<StockLevel>> {
        let result = sqlx::query("UPDATE stock_levels SET quantity = $2 WHERE item_id = $1")
            .bind(level.item_id.as_uuid())
            .bind(level.quantity)
            .execute(&self.pool)
            .await?;
        Ok((result.rows_affected() > 0).then_some(level))
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stock_levels WHERE item_id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement(&self, item_id: ItemId, amount: i32) -> Result<DecrementOutcome> {
        // One statement carries both the check and the subtraction, so
        // concurrent decrements serialize on the row lock and the level can
        // never go negative.
        let row = sqlx::query(
            "UPDATE stock_levels SET quantity = quantity - $2 \
             WHERE item_id = $1 AND quantity >= $2 RETURNING quantity",
        )
        .bind(item_id.as_uuid())
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let quantity: i32 = row.try_get("quantity")?;
            return Ok(DecrementOutcome::Applied(StockLevel::new(
                item_id, quantity,
            )));
        }

        // No row matched: the item is unknown or holds too little stock.
        match self.find(item_id).await? {
            Some(level) => Ok(DecrementOutcome::Insufficient {
                available: level.quantity,
            }),
            None => Ok(DecrementOutcome::NotFound),
        }
    }
}

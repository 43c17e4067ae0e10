use async_trait::async_trait;
use common::{ItemId, Money};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::Result;
use crate::item::{CatalogItem, NewCatalogItem};
use crate::store::CatalogStore;

/// PostgreSQL-backed catalog item store.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
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

    fn row_to_item(row: PgRow) -> Result<CatalogItem> {
        Ok(CatalogItem {
            id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            price_per_unit: Money::from_cents(row.try_get("price_per_unit_cents")?),
            category: row.try_get("category")?,
        })
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn insert(&self, new_item: NewCatalogItem) -> Result<CatalogItem> {
        let item = new_item.into_item();
        sqlx::query(
            "INSERT INTO catalog_items (id, name, price_per_unit_cents, category) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.price_per_unit.cents())
        .bind(&item.category)
        .execute(&self.pool)
        .await?;
        Ok(item)
    }

    async fn find(&self, item_id: ItemId) -> Result<Option<CatalogItem>> {
        let row = sqlx::query(
            "SELECT id, name, price_per_unit_cents, category FROM catalog_items WHERE id = $1",
        )
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_item).transpose()
    }

    async fn find_all(&self) -> Result<Vec<CatalogItem>> {
        let rows = sqlx::query(
            "SELECT id, name, price_per_unit_cents, category FROM catalog_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<CatalogItem>> {
        let rows = sqlx::query(
            "SELECT id, name, price_per_unit_cents, category FROM catalog_items \
             WHERE category = $1 ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>> {
        let result = sqlx::query(
            "UPDATE catalog_items SET name = $2, price_per_unit_cents = $3, category = $4 \
             WHERE id = $1",
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.price_per_unit.cents())
        .bind(&item.category)
        .execute(&self.pool)
        .await?;
        Ok((result.rows_affected() > 0).then_some(item))
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_category(&self, category: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE category = $1")
            .bind(category)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

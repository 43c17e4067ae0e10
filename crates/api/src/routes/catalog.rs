//! Catalog item endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use catalog::{CatalogItem, CatalogService, CatalogStore, ListedItem, NewCatalogItem};
use common::{CorrelationId, Money};
use remote::InventoryClient;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::parse_item_id;

/// Shared state for the catalog router.
pub struct CatalogState<S: CatalogStore, I: InventoryClient> {
    pub service: CatalogService<S, I>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CatalogItemRequest {
    pub name: String,
    pub price_per_unit_cents: i64,
    pub category: String,
}

impl CatalogItemRequest {
    fn into_fields(self) -> NewCatalogItem {
        NewCatalogItem::new(
            self.name,
            Money::from_cents(self.price_per_unit_cents),
            self.category,
        )
    }
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub category: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CatalogItemResponse {
    pub id: String,
    pub name: String,
    pub price_per_unit_cents: i64,
    pub category: String,
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            price_per_unit_cents: item.price_per_unit.cents(),
            category: item.category,
        }
    }
}

#[derive(Serialize)]
pub struct ListedItemResponse {
    pub id: String,
    pub name: String,
    pub price_per_unit_cents: i64,
    pub category: String,
    pub available_stock: Option<i32>,
}

impl From<ListedItem> for ListedItemResponse {
    fn from(listed: ListedItem) -> Self {
        Self {
            id: listed.item.id.to_string(),
            name: listed.item.name,
            price_per_unit_cents: listed.item.price_per_unit.cents(),
            category: listed.item.category,
            available_stock: listed.available_stock,
        }
    }
}

// -- Handlers --

/// GET /items — list all items, enriched with their live stock levels.
#[tracing::instrument(skip(state, correlation))]
pub async fn list<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Extension(correlation): Extension<CorrelationId>,
) -> Result<Json<Vec<ListedItemResponse>>, ApiError> {
    let listed = state.service.items_with_stock(&correlation).await?;
    Ok(Json(listed.into_iter().map(Into::into).collect()))
}

/// POST /items — create an item and provision its inventory record.
#[tracing::instrument(skip(state, correlation, req))]
pub async fn create<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Extension(correlation): Extension<CorrelationId>,
    Json(req): Json<CatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemResponse>), ApiError> {
    let item = state
        .service
        .add_item(req.into_fields(), &correlation)
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /items/{id} — fetch a single item.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogItemResponse>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let item = state
        .service
        .item(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("item {id} not found")))?;
    Ok(Json(item.into()))
}

/// GET /items/search?category= — list the items in a category.
#[tracing::instrument(skip(state, query))]
pub async fn search<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<CatalogItemResponse>>, ApiError> {
    let items = state.service.items_in_category(&query.category).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// PUT /items/{id} — overwrite an item's fields.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Path(id): Path<String>,
    Json(req): Json<CatalogItemRequest>,
) -> Result<Json<CatalogItemResponse>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let item = state
        .service
        .update_item(item_id, req.into_fields())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("item {id} not found")))?;
    Ok(Json(item.into()))
}

/// DELETE /items/{id} — remove a single item.
#[tracing::instrument(skip(state))]
pub async fn remove<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let item_id = parse_item_id(&id)?;
    if state.service.delete_item(item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("item {id} not found")))
    }
}

/// DELETE /items?category= — remove every item in a category.
#[tracing::instrument(skip(state, query))]
pub async fn remove_category<S: CatalogStore + 'static, I: InventoryClient + 'static>(
    State(state): State<Arc<CatalogState<S, I>>>,
    Query(query): Query<CategoryQuery>,
) -> Result<StatusCode, ApiError> {
    let removed = state.service.delete_category(&query.category).await?;
    tracing::info!(category = %query.category, removed, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

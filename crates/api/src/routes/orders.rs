//! Order endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::CorrelationId;
use orders::{Order, OrderDraft, OrdersService, OrdersStore};
use remote::{CatalogClient, InventoryClient};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::parse_order_id;

/// Shared state for the orders router.
pub struct OrdersState<S, I, C>
where
    S: OrdersStore,
    I: InventoryClient + Clone,
    C: CatalogClient,
{
    pub service: OrdersService<S, I, C>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub item_id: String,
    pub quantity: i32,
    pub price_per_unit_cents: i64,
    pub total_price_cents: i64,
    pub status: String,
    pub contact: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            item_id: order.item_id.to_string(),
            quantity: order.quantity,
            price_per_unit_cents: order.price_per_unit.cents(),
            total_price_cents: order.total_price.cents(),
            status: order.status.to_string(),
            contact: order.contact,
        }
    }
}

// -- Handlers --

/// POST / — place an order through the full placement flow.
#[tracing::instrument(skip(state, correlation, draft))]
pub async fn create<S, I, C>(
    State(state): State<Arc<OrdersState<S, I, C>>>,
    Extension(correlation): Extension<CorrelationId>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let order = state.service.create_order(draft, &correlation).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET / — list all orders, or only those in `?status=`.
#[tracing::instrument(skip(state, query))]
pub async fn list<S, I, C>(
    State(state): State<Arc<OrdersState<S, I, C>>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let orders = match &query.status {
        Some(status) => state.service.orders_with_status(status).await?,
        None => state.service.all_orders().await?,
    };
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /{id} — fetch a single order.
#[tracing::instrument(skip(state))]
pub async fn get<S, I, C>(
    State(state): State<Arc<OrdersState<S, I, C>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let order_id = parse_order_id(&id)?;
    let order = state
        .service
        .order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id} not found")))?;
    Ok(Json(order.into()))
}

/// PUT /{id} — overwrite an order's fields; the price snapshot is kept.
#[tracing::instrument(skip(state, draft))]
pub async fn update<S, I, C>(
    State(state): State<Arc<OrdersState<S, I, C>>>,
    Path(id): Path<String>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let order_id = parse_order_id(&id)?;
    let order = state
        .service
        .update_order(order_id, draft)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id} not found")))?;
    Ok(Json(order.into()))
}

/// DELETE /{id} — remove an order.
#[tracing::instrument(skip(state))]
pub async fn remove<S, I, C>(
    State(state): State<Arc<OrdersState<S, I, C>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: OrdersStore + 'static,
    I: InventoryClient + Clone + 'static,
    C: CatalogClient + 'static,
{
    let order_id = parse_order_id(&id)?;
    if state.service.delete_order(order_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("order {id} not found")))
    }
}

//! Stock level endpoints.
//!
//! The wire types are the same `StockLevelDto` / `DecrementRequest` the
//! peer clients speak, so the catalog and orders services decode exactly
//! what these handlers emit.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inventory::{DecrementOutcome, InventoryService, InventoryStore, StockLevel};
use remote::{DecrementRequest, StockLevelDto};

use crate::error::ApiError;

use super::parse_item_id;

/// Shared state for the inventory router.
pub struct InventoryState<S: InventoryStore> {
    pub service: InventoryService<S>,
}

fn to_dto(level: StockLevel) -> StockLevelDto {
    StockLevelDto::new(level.item_id, level.quantity)
}

// -- Handlers --

/// GET /items — list every stock level.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
) -> Result<Json<Vec<StockLevelDto>>, ApiError> {
    let levels = state.service.all_levels().await?;
    Ok(Json(levels.into_iter().map(to_dto).collect()))
}

/// GET /items/{id} — fetch one item's stock level.
#[tracing::instrument(skip(state))]
pub async fn get<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<StockLevelDto>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let level = state
        .service
        .level(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no stock level for item {id}")))?;
    Ok(Json(to_dto(level)))
}

/// POST /items — create a stock level for an item that has none yet.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
    Json(req): Json<StockLevelDto>,
) -> Result<(StatusCode, Json<StockLevelDto>), ApiError> {
    let level = state
        .service
        .add_level(StockLevel::new(req.id, req.quantity))
        .await?;
    Ok((StatusCode::CREATED, Json(to_dto(level))))
}

/// PUT /items — overwrite an existing stock level; the body carries the id.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
    Json(req): Json<StockLevelDto>,
) -> Result<Json<StockLevelDto>, ApiError> {
    let level = state
        .service
        .update_level(StockLevel::new(req.id, req.quantity))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no stock level for item {}", req.id)))?;
    Ok(Json(to_dto(level)))
}

/// DELETE /items/{id} — remove an item's stock level.
#[tracing::instrument(skip(state))]
pub async fn remove<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let item_id = parse_item_id(&id)?;
    if state.service.remove_level(item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("no stock level for item {id}")))
    }
}

/// POST /items/{id}/decrement — atomically subtract from an item's level.
///
/// Answers 200 with the new level, 404 for an unknown item, 409 when the
/// level cannot cover the amount, 400 for a non-positive amount.
#[tracing::instrument(skip(state, req))]
pub async fn decrement<S: InventoryStore + 'static>(
    State(state): State<Arc<InventoryState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<DecrementRequest>,
) -> Result<Json<StockLevelDto>, ApiError> {
    let item_id = parse_item_id(&id)?;
    match state.service.decrement(item_id, req.amount).await? {
        DecrementOutcome::Applied(level) => Ok(Json(to_dto(level))),
        DecrementOutcome::Insufficient { available } => Err(ApiError::Conflict(format!(
            "insufficient stock for item {id}: {available} available"
        ))),
        DecrementOutcome::NotFound => {
            Err(ApiError::NotFound(format!("no stock level for item {id}")))
        }
    }
}

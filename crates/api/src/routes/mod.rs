//! Route handlers for the three services.

pub mod catalog;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;

use common::{ItemId, OrderId};

use crate::error::ApiError;

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(ItemId::from_uuid)
        .map_err(|_| ApiError::BadRequest(format!("invalid item id: {raw:?}")))
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(OrderId::from_uuid)
        .map_err(|_| ApiError::BadRequest(format!("invalid order id: {raw:?}")))
}

//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use inventory::InventoryError;
use orders::OrdersError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Request conflicts with current state (duplicate id, insufficient
    /// stock).
    Conflict(String),
    /// Catalog service error.
    Catalog(CatalogError),
    /// Inventory service error.
    Inventory(InventoryError),
    /// Orders service error.
    Orders(OrdersError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Inventory(err) => inventory_error_to_response(err),
            ApiError::Orders(err) => orders_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    match &err {
        // The stranded-item message must reach the caller verbatim; it is
        // the only record naming the row that needs manual cleanup.
        CatalogError::RollbackFailed { .. } => {
            tracing::error!(error = %err, "catalog provisioning left a stranded item");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        CatalogError::Provisioning { .. } | CatalogError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn inventory_error_to_response(err: InventoryError) -> (StatusCode, String) {
    match &err {
        InventoryError::Duplicate(_) => (StatusCode::CONFLICT, err.to_string()),
        InventoryError::NegativeQuantity(_) | InventoryError::InvalidDecrement(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        InventoryError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn orders_error_to_response(err: OrdersError) -> (StatusCode, String) {
    match &err {
        OrdersError::Validation(_) | OrdersError::ItemUnknown(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        OrdersError::InsufficientStock { .. } => (StatusCode::CONFLICT, err.to_string()),
        OrdersError::StockNotAdjusted { .. } => {
            tracing::error!(error = %err, "order persisted without its stock decrement");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        OrdersError::Downstream(_) | OrdersError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        ApiError::Inventory(err)
    }
}

impl From<OrdersError> for ApiError {
    fn from(err: OrdersError) -> Self {
        ApiError::Orders(err)
    }
}

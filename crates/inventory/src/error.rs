use common::ItemId;
use thiserror::Error;

/// Errors that can occur when working with stock levels.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A stock level already exists for the item.
    #[error("stock level for item {0} already exists")]
    Duplicate(ItemId),

    /// Stock levels cannot be created or set below zero.
    #[error("stock quantity must not be negative, got {0}")]
    NegativeQuantity(i32),

    /// Decrement amounts must be at least 1.
    #[error("decrement amount must be at least 1, got {0}")]
    InvalidDecrement(i32),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

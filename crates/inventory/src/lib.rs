//! Stock level service for the order management suite.
//!
//! Holds the units-on-hand count for every catalog item. The interesting
//! operation is the conditional decrement: check and subtraction are one
//! atomic step inside the store, so concurrent ordering can never drive a
//! level below zero.

pub mod error;
pub mod level;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

pub use error::{InventoryError, Result};
pub use level::StockLevel;
pub use memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use service::InventoryService;
pub use store::{DecrementOutcome, InventoryStore};

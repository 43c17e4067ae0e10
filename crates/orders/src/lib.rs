//! Orders service for the order management suite.
//!
//! Owns the order lifecycle. Placing an order is a multi-step flow across
//! the other services: the unit price is captured from the catalog, the
//! stock gate checks the level, the order is persisted and the stock is
//! taken through the inventory's conditional decrement. A decrement that
//! fails after the order was written is reported, not rolled back.

pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod service;
pub mod status;
pub mod stock;
pub mod store;

pub use error::{OrdersError, Result, ValidationError};
pub use memory::InMemoryOrdersStore;
pub use order::{NewOrder, Order, OrderDraft};
pub use postgres::PostgresOrdersStore;
pub use service::OrdersService;
pub use status::OrderStatus;
pub use stock::StockGate;
pub use store::OrdersStore;

//! Catalog service for the order management suite.
//!
//! Owns the product catalog and keeps it consistent with the inventory
//! service: creating an item provisions a zero-quantity stock level under
//! the same id, and a failed provisioning rolls the catalog row back.

pub mod error;
pub mod item;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

pub use error::{CatalogError, Result};
pub use item::{CatalogItem, ListedItem, NewCatalogItem};
pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use service::CatalogService;
pub use store::CatalogStore;

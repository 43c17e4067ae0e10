//! HTTP clients for talking to peer services.
//!
//! [`ServiceClient`] is the transport: one JSON request per call, the
//! correlation id on every request, non-success statuses turned into typed
//! errors. On top of it sit the per-peer traits ([`InventoryClient`],
//! [`CatalogClient`]) with HTTP implementations for production and
//! in-memory implementations for tests and local wiring.

pub mod catalog;
pub mod client;
pub mod error;
pub mod inventory;

pub use catalog::{CatalogClient, CatalogItemDto, HttpCatalogClient, InMemoryCatalogClient};
pub use client::ServiceClient;
pub use error::RemoteError;
pub use inventory::{
    DecrementRequest, HttpInventoryClient, InMemoryInventoryClient, InventoryClient, StockLevelDto,
};

//! Catalog peer client: trait, HTTP implementation, in-memory fake.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{CorrelationId, ItemId, Money};
use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::error::RemoteError;

/// Catalog item wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemDto {
    /// Item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price in cents.
    pub price_per_unit_cents: i64,
    /// Category the item is filed under.
    pub category: String,
}

impl CatalogItemDto {
    /// Unit price as money.
    pub fn price_per_unit(&self) -> Money {
        Money::from_cents(self.price_per_unit_cents)
    }
}

/// Operations the orders service needs from the catalog service.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches a catalog item. `None` means the catalog has no item with
    /// the id (a 404 from the peer).
    async fn fetch_item(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<CatalogItemDto>, RemoteError>;
}

/// [`CatalogClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: ServiceClient,
}

impl HttpCatalogClient {
    /// Creates a client for the catalog service at `base_url` (including
    /// the `/api/v1/catalog` prefix).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ServiceClient::new("catalog", base_url),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_item(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<CatalogItemDto>, RemoteError> {
        match self
            .client
            .get(&format!("/items/{item_id}"), correlation)
            .await
        {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    items: HashMap<ItemId, CatalogItemDto>,
    fetch_calls: u32,
    last_correlation: Option<CorrelationId>,
    fail_on_fetch: bool,
}

/// In-memory catalog peer for tests and local wiring.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogClient {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogClient {
    /// Creates an empty in-memory catalog peer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item with the given price, returning its id.
    pub fn add_item(&self, name: &str, price_per_unit: Money, category: &str) -> ItemId {
        let id = ItemId::new();
        self.state.write().unwrap().items.insert(
            id,
            CatalogItemDto {
                id,
                name: name.to_string(),
                price_per_unit_cents: price_per_unit.cents(),
                category: category.to_string(),
            },
        );
        id
    }

    /// Overwrites an item's price.
    pub fn set_price(&self, item_id: ItemId, price_per_unit: Money) {
        if let Some(item) = self.state.write().unwrap().items.get_mut(&item_id) {
            item.price_per_unit_cents = price_per_unit.cents();
        }
    }

    /// Configures fetches to fail with a 500.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state.write().unwrap().fail_on_fetch = fail;
    }

    /// Number of fetches observed, including failed ones.
    pub fn fetch_count(&self) -> u32 {
        self.state.read().unwrap().fetch_calls
    }

    /// Correlation id presented on the most recent call.
    pub fn last_correlation(&self) -> Option<CorrelationId> {
        self.state.read().unwrap().last_correlation.clone()
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalogClient {
    async fn fetch_item(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<CatalogItemDto>, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.fetch_calls += 1;
        state.last_correlation = Some(correlation.clone());

        if state.fail_on_fetch {
            return Err(RemoteError::Status {
                service: "catalog",
                status: 500,
                body: "catalog unavailable".to_string(),
            });
        }

        Ok(state.items.get(&item_id).cloned())
    }
}

//! Inventory peer client: trait, HTTP implementation, in-memory fake.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{CorrelationId, ItemId};
use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::error::RemoteError;

/// Stock level wire shape shared by the inventory endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevelDto {
    /// Item the level belongs to (same id as the catalog item).
    pub id: ItemId,
    /// Units on hand.
    pub quantity: i32,
}

impl StockLevelDto {
    /// Creates a stock level.
    pub fn new(id: ItemId, quantity: i32) -> Self {
        Self { id, quantity }
    }

    /// Zero-quantity level, the shape provisioning creates for a new item.
    pub fn empty(id: ItemId) -> Self {
        Self { id, quantity: 0 }
    }
}

/// Body of the conditional decrement endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecrementRequest {
    /// Units to subtract; must be at least 1.
    pub amount: i32,
}

/// Operations the other services need from the inventory service.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetches the stock level for an item. `None` means the inventory
    /// service has no record for the id (a 404 from the peer).
    async fn fetch_level(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<StockLevelDto>, RemoteError>;

    /// Creates a stock level. The peer rejects duplicates with a 409, which
    /// surfaces here as an error.
    async fn create_level(
        &self,
        level: StockLevelDto,
        correlation: &CorrelationId,
    ) -> Result<(), RemoteError>;

    /// Atomically subtracts `amount` from the item's level and returns the
    /// new level. The peer enforces the condition: insufficient stock is a
    /// 409, an unknown item a 404, both surfacing as errors.
    async fn decrement_level(
        &self,
        item_id: ItemId,
        amount: i32,
        correlation: &CorrelationId,
    ) -> Result<StockLevelDto, RemoteError>;
}

/// [`InventoryClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: ServiceClient,
}

impl HttpInventoryClient {
    /// Creates a client for the inventory service at `base_url` (including
    /// the `/api/v1/inventory` prefix).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ServiceClient::new("inventory", base_url),
        }
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn fetch_level(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<StockLevelDto>, RemoteError> {
        match self
            .client
            .get(&format!("/items/{item_id}"), correlation)
            .await
        {
            Ok(level) => Ok(Some(level)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_level(
        &self,
        level: StockLevelDto,
        correlation: &CorrelationId,
    ) -> Result<(), RemoteError> {
        let _created: StockLevelDto = self.client.post("/items", &level, correlation).await?;
        Ok(())
    }

    async fn decrement_level(
        &self,
        item_id: ItemId,
        amount: i32,
        correlation: &CorrelationId,
    ) -> Result<StockLevelDto, RemoteError> {
        let body = DecrementRequest { amount };
        self.client
            .post(&format!("/items/{item_id}/decrement"), &body, correlation)
            .await
    }
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    levels: HashMap<ItemId, i32>,
    fetch_calls: u32,
    created_levels: Vec<StockLevelDto>,
    decrement_calls: Vec<(ItemId, i32)>,
    last_correlation: Option<CorrelationId>,
    fail_on_fetch: bool,
    fail_on_create: bool,
    fail_on_decrement: bool,
}

/// In-memory inventory peer for tests and local wiring.
///
/// Mirrors the real endpoints' semantics: unknown ids are absent, duplicate
/// creates answer 409, a decrement below zero answers 409. Calls are
/// recorded so tests can assert exact call patterns.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryClient {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryClient {
    /// Creates an empty in-memory inventory peer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an item's stock level directly.
    pub fn set_level(&self, item_id: ItemId, quantity: i32) {
        self.state.write().unwrap().levels.insert(item_id, quantity);
    }

    /// Returns an item's current level, if any.
    pub fn level(&self, item_id: ItemId) -> Option<i32> {
        self.state.read().unwrap().levels.get(&item_id).copied()
    }

    /// Configures fetches to fail with a 500.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state.write().unwrap().fail_on_fetch = fail;
    }

    /// Configures creates to fail with a 500.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures decrements to fail with a 500.
    pub fn set_fail_on_decrement(&self, fail: bool) {
        self.state.write().unwrap().fail_on_decrement = fail;
    }

    /// Number of fetches observed, including failed ones.
    pub fn fetch_count(&self) -> u32 {
        self.state.read().unwrap().fetch_calls
    }

    /// Levels passed to successful create calls, in order.
    pub fn created_levels(&self) -> Vec<StockLevelDto> {
        self.state.read().unwrap().created_levels.clone()
    }

    /// Arguments of every decrement attempt, in order.
    pub fn decrement_calls(&self) -> Vec<(ItemId, i32)> {
        self.state.read().unwrap().decrement_calls.clone()
    }

    /// Correlation id presented on the most recent call.
    pub fn last_correlation(&self) -> Option<CorrelationId> {
        self.state.read().unwrap().last_correlation.clone()
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventoryClient {
    async fn fetch_level(
        &self,
        item_id: ItemId,
        correlation: &CorrelationId,
    ) -> Result<Option<StockLevelDto>, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.fetch_calls += 1;
        state.last_correlation = Some(correlation.clone());

        if state.fail_on_fetch {
            return Err(RemoteError::Status {
                service: "inventory",
                status: 500,
                body: "inventory unavailable".to_string(),
            });
        }

        Ok(state
            .levels
            .get(&item_id)
            .map(|&quantity| StockLevelDto::new(item_id, quantity)))
    }

    async fn create_level(
        &self,
        level: StockLevelDto,
        correlation: &CorrelationId,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.write().unwrap();
        state.last_correlation = Some(correlation.clone());

        if state.fail_on_create {
            return Err(RemoteError::Status {
                service: "inventory",
                status: 500,
                body: "inventory unavailable".to_string(),
            });
        }
        if state.levels.contains_key(&level.id) {
            return Err(RemoteError::Status {
                service: "inventory",
                status: 409,
                body: format!("item {} already exists", level.id),
            });
        }

        state.created_levels.push(level);
        state.levels.insert(level.id, level.quantity);
        Ok(())
    }

    async fn decrement_level(
        &self,
        item_id: ItemId,
        amount: i32,
        correlation: &CorrelationId,
    ) -> Result<StockLevelDto, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.decrement_calls.push((item_id, amount));
        state.last_correlation = Some(correlation.clone());

        if state.fail_on_decrement {
            return Err(RemoteError::Status {
                service: "inventory",
                status: 500,
                body: "inventory unavailable".to_string(),
            });
        }

        match state.levels.get_mut(&item_id) {
            None => Err(RemoteError::Status {
                service: "inventory",
                status: 404,
                body: format!("no stock level for item {item_id}"),
            }),
            Some(quantity) if *quantity < amount => Err(RemoteError::Status {
                service: "inventory",
                status: 409,
                body: format!("insufficient stock for item {item_id}: {quantity} available"),
            }),
            Some(quantity) => {
                *quantity -= amount;
                Ok(StockLevelDto::new(item_id, *quantity))
            }
        }
    }
}

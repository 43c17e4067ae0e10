//! Catalog operations, including the inventory provisioning flow.

use common::{CorrelationId, ItemId};
use remote::{InventoryClient, RemoteError, StockLevelDto};

use crate::error::{CatalogError, Result};
use crate::item::{CatalogItem, ListedItem, NewCatalogItem};
use crate::store::CatalogStore;

/// Catalog operations over a store and the inventory peer.
///
/// Creating an item is a two-step flow with a compensating action: the
/// catalog row is inserted first, then a zero-quantity stock level is
/// provisioned under the same id. If provisioning fails the row is deleted
/// again, so no item is sellable without an inventory record.
#[derive(Clone)]
pub struct CatalogService<S: CatalogStore, I: InventoryClient> {
    store: S,
    inventory: I,
}

impl<S: CatalogStore, I: InventoryClient> CatalogService<S, I> {
    /// Creates a service over the given store and inventory client.
    pub fn new(store: S, inventory: I) -> Self {
        Self { store, inventory }
    }

    /// Creates a catalog item and provisions its inventory record.
    ///
    /// On provisioning failure the inserted row is rolled back and the
    /// inventory error is surfaced as [`CatalogError::Provisioning`]. If
    /// the rollback itself fails, [`CatalogError::RollbackFailed`] names
    /// the stranded item.
    #[tracing::instrument(skip(self, new_item), fields(name = %new_item.name))]
    pub async fn add_item(
        &self,
        new_item: NewCatalogItem,
        correlation: &CorrelationId,
    ) -> Result<CatalogItem> {
        let start = std::time::Instant::now();

        // 1. Insert the catalog row; the store assigns the id.
        let item = self.store.insert(new_item).await?;

        // 2. Provision a zero-quantity stock level under the same id.
        tracing::info!(item_id = %item.id, "provisioning inventory record");
        match self
            .inventory
            .create_level(StockLevelDto::empty(item.id), correlation)
            .await
        {
            Ok(()) => {
                metrics::counter!("catalog_items_provisioned_total").increment(1);
                metrics::histogram!("catalog_provisioning_duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                Ok(item)
            }
            Err(provision) => {
                // 3. Compensate: remove the row again, then surface the
                // provisioning error to the caller.
                tracing::warn!(
                    item_id = %item.id,
                    error = %provision,
                    "provisioning failed, rolling back catalog row"
                );
                self.roll_back(item.id, provision).await
            }
        }
    }

    async fn roll_back(&self, item_id: ItemId, provision: RemoteError) -> Result<CatalogItem> {
        match self.store.delete(item_id).await {
            Ok(_) => {
                metrics::counter!("catalog_provisioning_rolled_back_total").increment(1);
                Err(CatalogError::Provisioning {
                    item_id,
                    source: provision,
                })
            }
            Err(cleanup) => {
                tracing::error!(
                    item_id = %item_id,
                    error = %cleanup,
                    "rollback failed, item stranded without inventory record"
                );
                Err(CatalogError::RollbackFailed {
                    item_id,
                    provision,
                    cleanup: cleanup.to_string(),
                })
            }
        }
    }

    /// Returns an item, if one exists with the id.
    pub async fn item(&self, item_id: ItemId) -> Result<Option<CatalogItem>> {
        self.store.find(item_id).await
    }

    /// Lists every item with its live stock level attached.
    ///
    /// A failed level lookup only blanks that item's stock; the listing
    /// itself still succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn items_with_stock(&self, correlation: &CorrelationId) -> Result<Vec<ListedItem>> {
        let items = self.store.find_all().await?;
        let mut listed = Vec::with_capacity(items.len());

        for item in items {
            let available_stock = match self.inventory.fetch_level(item.id, correlation).await {
                Ok(level) => level.map(|l| l.quantity),
                Err(err) => {
                    tracing::warn!(
                        item_id = %item.id,
                        error = %err,
                        "stock lookup failed, listing item without stock"
                    );
                    None
                }
            };
            listed.push(ListedItem {
                item,
                available_stock,
            });
        }

        Ok(listed)
    }

    /// Returns the items filed under a category.
    pub async fn items_in_category(&self, category: &str) -> Result<Vec<CatalogItem>> {
        self.store.find_by_category(category).await
    }

    /// Overwrites an existing item's fields.
    ///
    /// Returns `None` when no item exists with the id. A price change only
    /// affects orders created afterwards; existing orders keep the price
    /// captured at their creation.
    #[tracing::instrument(skip(self, fields))]
    pub async fn update_item(
        &self,
        item_id: ItemId,
        fields: NewCatalogItem,
    ) -> Result<Option<CatalogItem>> {
        let item = CatalogItem {
            id: item_id,
            name: fields.name,
            price_per_unit: fields.price_per_unit,
            category: fields.category,
        };
        self.store.update(item).await
    }

    /// Deletes an item. Returns whether one existed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, item_id: ItemId) -> Result<bool> {
        self.store.delete(item_id).await
    }

    /// Deletes every item in a category, returning how many were removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_category(&self, category: &str) -> Result<u64> {
        self.store.delete_by_category(category).await
    }
}

#[cfg(test)]
mod tests {
    use common::Money;
    use remote::InMemoryInventoryClient;

    use super::*;
    use crate::memory::InMemoryCatalogStore;

    fn service() -> (
        CatalogService<InMemoryCatalogStore, InMemoryInventoryClient>,
        InMemoryCatalogStore,
        InMemoryInventoryClient,
    ) {
        let store = InMemoryCatalogStore::new();
        let inventory = InMemoryInventoryClient::new();
        let service = CatalogService::new(store.clone(), inventory.clone());
        (service, store, inventory)
    }

    fn keyboard() -> NewCatalogItem {
        NewCatalogItem::new("Keyboard", Money::from_cents(4999), "peripherals")
    }

    #[tokio::test]
    async fn add_item_provisions_a_zero_quantity_level() {
        let (service, store, inventory) = service();
        let correlation = CorrelationId::generate();

        let item = service.add_item(keyboard(), &correlation).await.unwrap();

        assert_eq!(store.find(item.id).await.unwrap(), Some(item.clone()));
        assert_eq!(inventory.level(item.id), Some(0));
        assert_eq!(
            inventory.created_levels(),
            vec![StockLevelDto::empty(item.id)]
        );
        assert_eq!(inventory.last_correlation(), Some(correlation));
    }

    #[tokio::test]
    async fn add_item_rolls_back_when_provisioning_fails() {
        let (service, store, inventory) = service();
        inventory.set_fail_on_create(true);

        let err = service
            .add_item(keyboard(), &CorrelationId::generate())
            .await
            .unwrap_err();

        let item_id = match err {
            CatalogError::Provisioning { item_id, source } => {
                assert_eq!(source.status(), Some(500));
                item_id
            }
            other => panic!("expected provisioning error, got {other:?}"),
        };
        // The compensating delete removed the row again.
        assert!(store.find(item_id).await.unwrap().is_none());
        assert_eq!(store.item_count().await, 0);
        assert_eq!(inventory.level(item_id), None);
    }

    #[tokio::test]
    async fn failed_rollback_reports_the_stranded_item() {
        let (service, store, inventory) = service();
        inventory.set_fail_on_create(true);
        store.set_fail_on_delete(true).await;

        let err = service
            .add_item(keyboard(), &CorrelationId::generate())
            .await
            .unwrap_err();

        let item_id = match err {
            CatalogError::RollbackFailed {
                item_id, provision, ..
            } => {
                assert_eq!(provision.status(), Some(500));
                item_id
            }
            other => panic!("expected rollback failure, got {other:?}"),
        };
        // The row is stranded: still in the catalog, no inventory record.
        assert!(store.find(item_id).await.unwrap().is_some());
        assert_eq!(inventory.level(item_id), None);
    }

    #[tokio::test]
    async fn rollback_failure_message_demands_manual_intervention() {
        let (service, store, inventory) = service();
        inventory.set_fail_on_create(true);
        store.set_fail_on_delete(true).await;

        let err = service
            .add_item(keyboard(), &CorrelationId::generate())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("manual intervention required"));
        assert!(message.contains("stranded"));
    }

    #[tokio::test]
    async fn items_with_stock_attaches_live_levels() {
        let (service, _store, inventory) = service();
        let correlation = CorrelationId::generate();

        let a = service.add_item(keyboard(), &correlation).await.unwrap();
        let b = service
            .add_item(
                NewCatalogItem::new("Mouse", Money::from_cents(1500), "peripherals"),
                &correlation,
            )
            .await
            .unwrap();
        inventory.set_level(a.id, 7);

        let listed = service.items_with_stock(&correlation).await.unwrap();

        assert_eq!(listed.len(), 2);
        let stock_of = |id: ItemId| {
            listed
                .iter()
                .find(|l| l.item.id == id)
                .and_then(|l| l.available_stock)
        };
        assert_eq!(stock_of(a.id), Some(7));
        assert_eq!(stock_of(b.id), Some(0));
    }

    #[tokio::test]
    async fn items_with_stock_blanks_stock_when_inventory_is_down() {
        let (service, _store, inventory) = service();
        let correlation = CorrelationId::generate();
        service.add_item(keyboard(), &correlation).await.unwrap();
        inventory.set_fail_on_fetch(true);

        let listed = service.items_with_stock(&correlation).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].available_stock, None);
    }

    #[tokio::test]
    async fn update_item_overwrites_fields_and_keeps_the_id() {
        let (service, _store, _inventory) = service();
        let correlation = CorrelationId::generate();
        let item = service.add_item(keyboard(), &correlation).await.unwrap();

        let updated = service
            .update_item(
                item.id,
                NewCatalogItem::new("Keyboard MK2", Money::from_cents(5999), "peripherals"),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "Keyboard MK2");
        assert_eq!(updated.price_per_unit, Money::from_cents(5999));
    }

    #[tokio::test]
    async fn update_item_returns_none_for_unknown_ids() {
        let (service, _store, _inventory) = service();
        let updated = service.update_item(ItemId::new(), keyboard()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_category_removes_only_that_category() {
        let (service, store, _inventory) = service();
        let correlation = CorrelationId::generate();
        service.add_item(keyboard(), &correlation).await.unwrap();
        service
            .add_item(
                NewCatalogItem::new("Teddy", Money::from_cents(2500), "toys"),
                &correlation,
            )
            .await
            .unwrap();

        let removed = service.delete_category("peripherals").await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.item_count().await, 1);
        assert_eq!(service.items_in_category("toys").await.unwrap().len(), 1);
    }
}

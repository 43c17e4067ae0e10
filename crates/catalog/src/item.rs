//! Catalog item domain types.

use common::{ItemId, Money};
use serde::{Deserialize, Serialize};

/// A sellable product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item id, shared with the inventory service.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price_per_unit: Money,
    /// Category the item is filed under.
    pub category: String,
}

/// Fields of an item that does not exist yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price_per_unit: Money,
    /// Category the item is filed under.
    pub category: String,
}

impl NewCatalogItem {
    /// Creates the fields for a new item.
    pub fn new(
        name: impl Into<String>,
        price_per_unit: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price_per_unit,
            category: category.into(),
        }
    }

    /// Attaches a fresh id, producing the row to insert.
    pub fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(),
            name: self.name,
            price_per_unit: self.price_per_unit,
            category: self.category,
        }
    }
}

/// A catalog item joined with its live stock level for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    /// The catalog item.
    pub item: CatalogItem,
    /// Units on hand right now; `None` when the inventory service has no
    /// record or could not be reached.
    pub available_stock: Option<i32>,
}

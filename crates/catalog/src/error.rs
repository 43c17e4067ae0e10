use common::ItemId;
use remote::RemoteError;
use thiserror::Error;

/// Errors that can occur in the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Creating the item's inventory record failed and the catalog row was
    /// rolled back. Carries the inventory error that failed the step.
    #[error("inventory provisioning for item {item_id} failed, catalog row rolled back: {source}")]
    Provisioning {
        /// Id the rolled-back item had.
        item_id: ItemId,
        /// The inventory error that failed the provisioning step.
        #[source]
        source: RemoteError,
    },

    /// Provisioning failed and so did the compensating delete: the catalog
    /// row still exists without an inventory record and must be removed or
    /// re-provisioned by hand.
    #[error(
        "manual intervention required: item {item_id} is stranded without an inventory record, \
         rollback failed ({cleanup}) after provisioning error: {provision}"
    )]
    RollbackFailed {
        /// Id of the stranded item.
        item_id: ItemId,
        /// The inventory error that failed the provisioning step.
        #[source]
        provision: RemoteError,
        /// Why the compensating delete failed.
        cleanup: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

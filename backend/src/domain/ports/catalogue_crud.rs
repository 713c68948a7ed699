//! Driving port exposing the catalogue CRUD use-cases.
//!
//! Inbound adapters depend on this trait object rather than on the concrete
//! service so handlers stay testable without I/O.

use async_trait::async_trait;

use crate::domain::{CatalogueItem, CatalogueItemDraft, Error};

/// The five catalogue operations plus their error contract.
///
/// `get_item` fails with a not-found error when no row matches; `list_items`
/// never fails on an empty result. `delete_item` takes an already-loaded
/// item: callers resolve the key to a record first, so a missing id
/// surfaces as not-found before any delete is issued.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCrud: Send + Sync {
    /// All items sorted by name ascending.
    async fn list_items(&self) -> Result<Vec<CatalogueItem>, Error>;

    /// Exactly one item; not-found when no row matches the key.
    async fn get_item(&self, id: i64) -> Result<CatalogueItem, Error>;

    /// Stamp `created_on`, persist, and return the assigned identifier.
    /// No existence check: duplicate creation with identical fields is
    /// permitted.
    async fn create_item(&self, draft: CatalogueItemDraft) -> Result<i64, Error>;

    /// Overwrite the mutable fields of the record matching `id`, stamp
    /// `updated_on`, and persist. Not-found when no record matches.
    async fn update_item(&self, id: i64, draft: CatalogueItemDraft) -> Result<(), Error>;

    /// Delete the given already-loaded item.
    async fn delete_item(&self, item: &CatalogueItem) -> Result<(), Error>;
}

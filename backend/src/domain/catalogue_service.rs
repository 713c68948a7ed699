//! Catalogue CRUD domain service.
//!
//! Implements the [`CatalogueCrud`] driving port on top of an [`ItemStore`]
//! port. Owns the not-found policy and timestamp stamping; persistence for
//! update and delete is awaited before control returns, so a success result
//! means the write completed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{CatalogueCrud, ItemStore, ItemStoreError};
use crate::domain::{CatalogueItem, CatalogueItemDraft, Error};

fn map_store_error(error: ItemStoreError) -> Error {
    match error {
        ItemStoreError::Connection { message } => {
            Error::service_unavailable(format!("item store unavailable: {message}"))
        }
        ItemStoreError::Query { message } => Error::internal(format!("item store error: {message}")),
    }
}

fn not_found(id: i64) -> Error {
    Error::not_found(
        format!("Catalogue Item not found for the provided id :: {id}"),
        "no catalogue item matches the requested key",
    )
}

/// Service orchestrating item store calls into the five CRUD operations.
#[derive(Clone)]
pub struct CatalogueCrudService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> CatalogueCrudService<S> {
    /// Create a new service over the given store and clock.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl<S> CatalogueCrud for CatalogueCrudService<S>
where
    S: ItemStore,
{
    async fn list_items(&self) -> Result<Vec<CatalogueItem>, Error> {
        self.store.find_all_sorted().await.map_err(map_store_error)
    }

    async fn get_item(&self, id: i64) -> Result<CatalogueItem, Error> {
        self.store
            .find_by_key(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn create_item(&self, draft: CatalogueItemDraft) -> Result<i64, Error> {
        let CatalogueItemDraft {
            name,
            description,
            category,
            price,
            inventory,
        } = draft;
        let item = CatalogueItem {
            id: None,
            name,
            description,
            category,
            price,
            inventory,
            created_on: Some(self.clock.utc()),
            updated_on: None,
        };

        let stored = self.store.save(&item).await.map_err(map_store_error)?;
        stored
            .id
            .ok_or_else(|| Error::internal("item store returned a saved item without an id"))
    }

    async fn update_item(&self, id: i64, draft: CatalogueItemDraft) -> Result<(), Error> {
        let mut current = self.get_item(id).await?;

        current.name = draft.name;
        current.description = draft.description;
        current.price = draft.price;
        current.inventory = draft.inventory;
        // `category` is left untouched on update; see DESIGN.md.
        current.updated_on = Some(self.clock.utc());

        self.store.save(&current).await.map_err(map_store_error)?;
        Ok(())
    }

    async fn delete_item(&self, item: &CatalogueItem) -> Result<(), Error> {
        self.store.delete(item).await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;

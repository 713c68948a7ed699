//! Domain ports for the hexagonal boundary.

mod catalogue_crud;
mod item_store;

pub use catalogue_crud::CatalogueCrud;
#[cfg(test)]
pub use catalogue_crud::MockCatalogueCrud;
#[cfg(test)]
pub use item_store::MockItemStore;
pub use item_store::{InMemoryItemStore, ItemStore, ItemStoreError};

//! Persistence port for catalogue item records, plus the in-memory fixture
//! store used by tests and database-less deployments.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::CatalogueItem;

/// Errors raised by item store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemStoreError {
    /// Store connection could not be established.
    #[error("item store connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution or row conversion.
    #[error("item store query failed: {message}")]
    Query { message: String },
}

impl ItemStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port abstracting persistence of catalogue item records.
///
/// Every operation is asynchronous; adapters dispatch the underlying I/O on
/// the runtime without blocking the calling task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items ordered by name ascending. An empty store yields an empty
    /// vector rather than an error.
    async fn find_all_sorted(&self) -> Result<Vec<CatalogueItem>, ItemStoreError>;

    /// Zero-or-one item for the given key.
    async fn find_by_key(&self, id: i64) -> Result<Option<CatalogueItem>, ItemStoreError>;

    /// Insert when `item.id` is `None` (assigning an identifier), update
    /// otherwise. Returns the persisted record.
    async fn save(&self, item: &CatalogueItem) -> Result<CatalogueItem, ItemStoreError>;

    /// Remove the given already-persisted item. Completes once the row is
    /// gone; deleting an unsaved item is a query error.
    async fn delete(&self, item: &CatalogueItem) -> Result<(), ItemStoreError>;
}

/// In-memory [`ItemStore`] implementation.
///
/// Serves as the fixture adapter for tests and as the fallback store when no
/// database is configured. Identifiers are assigned from a monotonically
/// increasing counter, mirroring a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: Mutex<InMemoryInner>,
}

#[derive(Debug, Default)]
struct InMemoryInner {
    items: BTreeMap<i64, CatalogueItem>,
    next_id: i64,
}

impl InMemoryItemStore {
    fn lock(&self) -> Result<MutexGuard<'_, InMemoryInner>, ItemStoreError> {
        self.inner
            .lock()
            .map_err(|_| ItemStoreError::query("item store mutex poisoned"))
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_all_sorted(&self) -> Result<Vec<CatalogueItem>, ItemStoreError> {
        let inner = self.lock()?;
        let mut items: Vec<CatalogueItem> = inner.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_key(&self, id: i64) -> Result<Option<CatalogueItem>, ItemStoreError> {
        Ok(self.lock()?.items.get(&id).cloned())
    }

    async fn save(&self, item: &CatalogueItem) -> Result<CatalogueItem, ItemStoreError> {
        let mut inner = self.lock()?;
        let mut stored = item.clone();
        let id = match stored.id {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                stored.id = Some(inner.next_id);
                inner.next_id
            }
        };
        inner.items.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, item: &CatalogueItem) -> Result<(), ItemStoreError> {
        let id = item
            .id
            .ok_or_else(|| ItemStoreError::query("cannot delete an item that was never saved"))?;
        self.lock()?.items.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory fixture store.
    use super::*;

    fn item(name: &str) -> CatalogueItem {
        CatalogueItem {
            id: None,
            name: name.to_owned(),
            description: "Item Desc".to_owned(),
            category: "Books".to_owned(),
            price: 100.0,
            inventory: 10,
            created_on: None,
            updated_on: None,
        }
    }

    #[actix_web::test]
    async fn save_assigns_sequential_identifiers() {
        let store = InMemoryItemStore::default();

        let first = store.save(&item("first")).await.expect("save should succeed");
        let second = store
            .save(&item("second"))
            .await
            .expect("save should succeed");

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[actix_web::test]
    async fn find_all_sorted_orders_by_name_ascending() {
        let store = InMemoryItemStore::default();
        for name in ["zephyr", "alto", "meridian"] {
            store.save(&item(name)).await.expect("save should succeed");
        }

        let names: Vec<String> = store
            .find_all_sorted()
            .await
            .expect("listing should succeed")
            .into_iter()
            .map(|stored| stored.name)
            .collect();

        assert_eq!(names, vec!["alto", "meridian", "zephyr"]);
    }

    #[actix_web::test]
    async fn save_with_an_id_overwrites_the_existing_row() {
        let store = InMemoryItemStore::default();
        let mut stored = store.save(&item("original")).await.expect("save");
        stored.name = "renamed".to_owned();

        store.save(&stored).await.expect("update should succeed");

        let found = store
            .find_by_key(stored.id.expect("saved item has an id"))
            .await
            .expect("lookup should succeed")
            .expect("row should exist");
        assert_eq!(found.name, "renamed");
    }

    #[actix_web::test]
    async fn delete_requires_a_persisted_item() {
        let store = InMemoryItemStore::default();

        let error = store
            .delete(&item("unsaved"))
            .await
            .expect_err("deleting an unsaved item should fail");

        assert!(matches!(error, ItemStoreError::Query { .. }));
    }

    #[actix_web::test]
    async fn delete_removes_the_row() {
        let store = InMemoryItemStore::default();
        let stored = store.save(&item("ephemeral")).await.expect("save");

        store.delete(&stored).await.expect("delete should succeed");

        let found = store
            .find_by_key(stored.id.expect("saved item has an id"))
            .await
            .expect("lookup should succeed");
        assert!(found.is_none());
    }
}

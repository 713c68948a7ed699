//! PostgreSQL-backed [`ItemStore`] implementation using Diesel.
//!
//! All query execution goes through `diesel-async`, so no thread blocks
//! while a statement is in flight.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::CatalogueItem;
use crate::domain::ports::{ItemStore, ItemStoreError};

use super::models::{CatalogueItemChangeset, CatalogueItemRow, NewCatalogueItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::catalogue_items;

/// Diesel-backed implementation of the item store port.
#[derive(Clone)]
pub struct DieselItemStore {
    pool: DbPool,
}

impl DieselItemStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to item store errors.
fn map_pool_error(error: PoolError) -> ItemStoreError {
    let (PoolError::Checkout { message } | PoolError::Build { message }) = error;
    ItemStoreError::connection(message)
}

/// Map Diesel errors to item store errors, logging the raw failure.
fn map_diesel_error(error: diesel::result::Error) -> ItemStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ItemStoreError::connection("database connection error")
        }
        DieselError::NotFound => ItemStoreError::query("record not found"),
        _ => ItemStoreError::query("database error"),
    }
}

/// Convert a database row into the domain entity.
fn row_to_item(row: CatalogueItemRow) -> CatalogueItem {
    let CatalogueItemRow {
        id,
        item_name,
        description,
        category,
        price,
        inventory,
        created_on,
        updated_on,
    } = row;

    CatalogueItem {
        id: Some(id),
        name: item_name,
        description,
        category,
        price,
        inventory,
        created_on: Some(created_on),
        updated_on,
    }
}

/// The service stamps `created_on` before saving; an unstamped item cannot
/// be persisted because the column is non-null.
fn stamped_created_on(item: &CatalogueItem) -> Result<DateTime<Utc>, ItemStoreError> {
    item.created_on
        .ok_or_else(|| ItemStoreError::query("created_on must be stamped before save"))
}

#[async_trait]
impl ItemStore for DieselItemStore {
    async fn find_all_sorted(&self) -> Result<Vec<CatalogueItem>, ItemStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CatalogueItemRow> = catalogue_items::table
            .order(catalogue_items::item_name.asc())
            .select(CatalogueItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_by_key(&self, id: i64) -> Result<Option<CatalogueItem>, ItemStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = catalogue_items::table
            .find(id)
            .select(CatalogueItemRow::as_select())
            .first::<CatalogueItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_item))
    }

    async fn save(&self, item: &CatalogueItem) -> Result<CatalogueItem, ItemStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let created_on = stamped_created_on(item)?;

        let row = match item.id {
            None => {
                let new_row = NewCatalogueItemRow {
                    item_name: &item.name,
                    description: &item.description,
                    category: &item.category,
                    price: item.price,
                    inventory: item.inventory,
                    created_on,
                    updated_on: item.updated_on,
                };

                diesel::insert_into(catalogue_items::table)
                    .values(&new_row)
                    .returning(CatalogueItemRow::as_returning())
                    .get_result::<CatalogueItemRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
            Some(id) => {
                let changeset = CatalogueItemChangeset {
                    item_name: &item.name,
                    description: &item.description,
                    category: &item.category,
                    price: item.price,
                    inventory: item.inventory,
                    updated_on: item.updated_on,
                };

                diesel::update(catalogue_items::table.find(id))
                    .set(&changeset)
                    .returning(CatalogueItemRow::as_returning())
                    .get_result::<CatalogueItemRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Ok(row_to_item(row))
    }

    async fn delete(&self, item: &CatalogueItem) -> Result<(), ItemStoreError> {
        let id = item
            .id
            .ok_or_else(|| ItemStoreError::query("cannot delete an item that was never saved"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(catalogue_items::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> CatalogueItemRow {
        let created_on = Utc.with_ymd_and_hms(2026, 2, 1, 11, 0, 0).unwrap();
        CatalogueItemRow {
            id: 7,
            item_name: "Item Name".to_owned(),
            description: "Item Desc".to_owned(),
            category: "Books".to_owned(),
            price: 100.0,
            inventory: 10,
            created_on,
            updated_on: None,
        }
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(error, ItemStoreError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_a_query_error() {
        let error = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(error, ItemStoreError::Query { .. }));
        assert!(error.to_string().contains("record not found"));
    }

    #[rstest]
    fn rows_convert_into_persisted_entities(valid_row: CatalogueItemRow) {
        let item = row_to_item(valid_row);

        assert_eq!(item.id, Some(7));
        assert_eq!(item.name, "Item Name");
        assert!(item.created_on.is_some());
        assert_eq!(item.updated_on, None);
    }

    #[rstest]
    fn unstamped_items_are_rejected_before_insert(valid_row: CatalogueItemRow) {
        let mut item = row_to_item(valid_row);
        item.created_on = None;

        let error = stamped_created_on(&item).expect_err("unstamped item should be rejected");
        assert!(matches!(error, ItemStoreError::Query { .. }));
    }
}

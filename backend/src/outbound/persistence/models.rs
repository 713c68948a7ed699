//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::catalogue_items;

/// Row struct for reading from the catalogue_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = catalogue_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CatalogueItemRow {
    pub id: i64,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub inventory: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

/// Insertable struct for creating new catalogue item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = catalogue_items)]
pub(crate) struct NewCatalogueItemRow<'a> {
    pub item_name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub inventory: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

/// Changeset struct for updating existing catalogue item records.
///
/// `created_on` is deliberately absent: it is written once at creation and
/// never modified afterwards.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = catalogue_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CatalogueItemChangeset<'a> {
    pub item_name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub inventory: i32,
    pub updated_on: Option<DateTime<Utc>>,
}

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`
//! exactly; Diesel uses them for compile-time query validation and
//! type-safe SQL generation.

diesel::table! {
    /// Catalogue item records.
    ///
    /// The `id` column is a `BIGSERIAL` primary key assigned on first
    /// insert. `created_on` is written once at creation; `updated_on` is
    /// null until the first update.
    catalogue_items (id) {
        id -> Int8,
        item_name -> Varchar,
        description -> Varchar,
        category -> Varchar,
        price -> Float8,
        inventory -> Int4,
        created_on -> Timestamptz,
        updated_on -> Nullable<Timestamptz>,
    }
}

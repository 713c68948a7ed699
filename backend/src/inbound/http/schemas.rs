//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the wire shape of their corresponding domain types
//! but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::CatalogueItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CatalogueItem, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CatalogueItemSchema {
    /// Store-assigned identifier; null until first persistence.
    id: Option<i64>,
    /// Non-empty display name.
    #[schema(example = "Antique Atlas")]
    name: String,
    /// Non-empty description.
    description: String,
    /// One of the allowed category names, compared case-insensitively.
    #[schema(example = "BOOKS")]
    category: String,
    price: f64,
    inventory: i32,
    /// Stamped once at creation by the service.
    #[schema(format = "date-time")]
    created_on: Option<String>,
    /// Stamped on every successful update.
    #[schema(format = "date-time")]
    updated_on: Option<String>,
}

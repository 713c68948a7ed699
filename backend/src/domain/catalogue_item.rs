//! Catalogue item entity, category enumeration, and boundary validation.
//!
//! The entity doubles as the wire shape for list/get/stream responses, so a
//! serde round-trip preserves every field exactly, timestamps included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ErrorCode, ErrorEntry};

/// The single product-like resource managed by this service.
///
/// ## Invariants
/// - `id` stays `None` until the store assigns one and is immutable after.
/// - `created_on` is stamped exactly once by the service at creation.
/// - `category` matches a member of [`Category`] (checked case-insensitively
///   at the API boundary before persistence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItem {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    /// Echoed exactly as the client supplied it.
    pub category: String,
    pub price: f64,
    pub inventory: i32,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

/// Allowed catalogue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Books,
    Music,
    Movies,
    Electronics,
    Toys,
}

impl Category {
    /// Upper-cased names of every allowed category.
    pub const fn names() -> &'static [&'static str] {
        &["BOOKS", "MUSIC", "MOVIES", "ELECTRONICS", "TOYS"]
    }
}

/// Case-insensitive membership test against an allowed-name set.
///
/// # Examples
/// ```
/// use backend::domain::{Category, category_is_allowed};
///
/// assert!(category_is_allowed("Books", Category::names()));
/// assert!(!category_is_allowed("INVALID", Category::names()));
/// ```
pub fn category_is_allowed(value: &str, allowed: &[&str]) -> bool {
    let normalised = value.trim().to_uppercase();
    !normalised.is_empty() && allowed.contains(&normalised.as_str())
}

/// Client-supplied fields accepted by create and update, post-validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueItemDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub inventory: i32,
}

/// Raw, unvalidated payload fields as deserialised at the API boundary.
///
/// Every field is optional so [`validate_payload`] can report all missing
/// or invalid fields in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub inventory: Option<i32>,
}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldViolation {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl From<Vec<FieldViolation>> for Error {
    fn from(violations: Vec<FieldViolation>) -> Self {
        let entries = violations
            .into_iter()
            .map(|violation| {
                ErrorEntry::new(
                    violation.message,
                    format!("field '{}' failed validation", violation.field),
                )
            })
            .collect();
        Error::with_entries(ErrorCode::InvalidRequest, entries)
    }
}

/// Validate a raw payload against the allowed category set.
///
/// Returns every violation, not just the first, so clients see the complete
/// list of offending fields in one response.
pub fn validate_payload(
    payload: CatalogueItemPayload,
    allowed_categories: &[&str],
) -> Result<CatalogueItemDraft, Vec<FieldViolation>> {
    let CatalogueItemPayload {
        name,
        description,
        category,
        price,
        inventory,
    } = payload;

    let mut violations = Vec::new();

    let name = match name {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            violations.push(FieldViolation::new("name", "Name cannot be null or empty"));
            None
        }
    };

    let description = match description {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            violations.push(FieldViolation::new(
                "description",
                "Description cannot be null or empty",
            ));
            None
        }
    };

    let category = match category {
        Some(value) if category_is_allowed(&value, allowed_categories) => Some(value),
        _ => {
            violations.push(FieldViolation::new("category", "Invalid category provided"));
            None
        }
    };

    if price.is_none() {
        violations.push(FieldViolation::new(
            "price",
            "Price cannot be null or empty",
        ));
    }

    if inventory.is_none() {
        violations.push(FieldViolation::new(
            "inventory",
            "Inventory cannot be null or empty",
        ));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    // All five fields are present once the violation list is empty.
    match (name, description, category, price, inventory) {
        (Some(name), Some(description), Some(category), Some(price), Some(inventory)) => {
            Ok(CatalogueItemDraft {
                name,
                description,
                category,
                price,
                inventory,
            })
        }
        _ => Err(vec![FieldViolation::new(
            "payload",
            "Payload validation failed",
        )]),
    }
}

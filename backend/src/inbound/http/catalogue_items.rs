//! Catalogue item HTTP handlers.
//!
//! ```text
//! GET    /api/v1            list items
//! GET    /api/v1/stream     list items as a paced SSE stream
//! GET    /api/v1/{id}       fetch one item
//! POST   /api/v1            create an item
//! PUT    /api/v1/{id}       update an item
//! DELETE /api/v1/{id}       delete an item
//! ```

use std::time::Duration;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use futures_util::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CatalogueItem, CatalogueItemDraft, CatalogueItemPayload, Category, Error, validate_payload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::CatalogueItemSchema;
use crate::inbound::http::state::HttpState;

/// Fixed inter-element delay applied to `/stream` responses.
const STREAM_DELAY: Duration = Duration::from_millis(200);

/// Raw request payload for create and update.
///
/// Every field is optional at deserialisation time so the explicit
/// validation pass can report all missing or invalid fields at once.
/// `id` and the timestamps are accepted but ignored: the store assigns
/// identifiers and the service stamps timestamps.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItemBody {
    pub id: Option<i64>,
    #[schema(example = "Antique Atlas")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "BOOKS")]
    pub category: Option<String>,
    pub price: Option<f64>,
    pub inventory: Option<i32>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub created_on: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Response envelope carrying a newly created item's identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceIdentity {
    pub id: i64,
}

/// Run the body through boundary validation, producing a draft or a 400
/// error enumerating every violated field.
fn validated_draft(body: CatalogueItemBody) -> Result<CatalogueItemDraft, Error> {
    let CatalogueItemBody {
        name,
        description,
        category,
        price,
        inventory,
        ..
    } = body;
    let payload = CatalogueItemPayload {
        name,
        description,
        category,
        price,
        inventory,
    };
    validate_payload(payload, Category::names()).map_err(Error::from)
}

/// Emit each item as a server-sent `data:` frame, withholding every element
/// for `delay` after the previous one.
///
/// The pacing is a fixed per-element timer rather than a response to actual
/// consumer demand. Dropping the stream (client disconnect) cancels the
/// in-flight timer and stops element production.
fn paced_sse_stream(
    items: Vec<CatalogueItem>,
    delay: Duration,
) -> impl Stream<Item = Result<web::Bytes, Error>> {
    futures_util::stream::iter(items).then(move |item| async move {
        tokio::time::sleep(delay).await;
        let json = serde_json::to_string(&item)
            .map_err(|err| Error::internal(format!("failed to serialise catalogue item: {err}")))?;
        Ok(web::Bytes::from(format!("data: {json}\n\n")))
    })
}

/// Get catalogue items available in the store, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1",
    responses(
        (status = 200, description = "Catalogue items sorted by name", body = Vec<CatalogueItemSchema>),
        (status = 503, description = "Item store unavailable", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "getCatalogueItems"
)]
#[get("")]
pub async fn get_catalogue_items(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CatalogueItem>>> {
    let items = state.catalogue.list_items().await?;
    Ok(web::Json(items))
}

/// Stream catalogue items as server-sent events with per-element pacing.
#[utoipa::path(
    get,
    path = "/api/v1/stream",
    responses(
        (
            status = 200,
            description = "Catalogue items as SSE frames, one every 200 ms",
            body = String,
            content_type = "text/event-stream"
        ),
        (status = 503, description = "Item store unavailable", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "getCatalogueItemsStream"
)]
#[get("/stream")]
pub async fn get_catalogue_items_stream(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.catalogue.list_items().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .streaming(paced_sse_stream(items, STREAM_DELAY)))
}

/// Get a single catalogue item by its identifier.
#[utoipa::path(
    get,
    path = "/api/v1/{id}",
    params(("id" = i64, Path, description = "Catalogue item identifier")),
    responses(
        (status = 200, description = "The catalogue item", body = CatalogueItemSchema),
        (status = 404, description = "No item matches the identifier", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "getCatalogueItem"
)]
#[get("/{id}")]
pub async fn get_catalogue_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CatalogueItem>> {
    let item = state.catalogue.get_item(path.into_inner()).await?;
    Ok(web::Json(item))
}

/// Create a catalogue item.
#[utoipa::path(
    post,
    path = "/api/v1",
    request_body = CatalogueItemBody,
    responses(
        (status = 201, description = "Item created", body = ResourceIdentity),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "addCatalogueItem"
)]
#[post("")]
pub async fn add_catalogue_item(
    state: web::Data<HttpState>,
    payload: web::Json<CatalogueItemBody>,
) -> ApiResult<HttpResponse> {
    let draft = validated_draft(payload.into_inner())?;
    let id = state.catalogue.create_item(draft).await?;
    Ok(HttpResponse::Created().json(ResourceIdentity { id }))
}

/// Update a catalogue item.
#[utoipa::path(
    put,
    path = "/api/v1/{id}",
    params(("id" = i64, Path, description = "Catalogue item identifier")),
    request_body = CatalogueItemBody,
    responses(
        (status = 200, description = "Item updated"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "No item matches the identifier", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "updateCatalogueItem"
)]
#[put("/{id}")]
pub async fn update_catalogue_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CatalogueItemBody>,
) -> ApiResult<HttpResponse> {
    let draft = validated_draft(payload.into_inner())?;
    state.catalogue.update_item(path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove a catalogue item.
///
/// The item is looked up first so a missing identifier surfaces as 404
/// before any delete is issued.
#[utoipa::path(
    delete,
    path = "/api/v1/{id}",
    params(("id" = i64, Path, description = "Catalogue item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "No item matches the identifier", body = ErrorResponse)
    ),
    tags = ["catalogue-items"],
    operation_id = "removeCatalogueItem"
)]
#[delete("/{id}")]
pub async fn remove_catalogue_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let item = state.catalogue.get_item(path.into_inner()).await?;
    state.catalogue.delete_item(&item).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "catalogue_items_tests.rs"]
mod tests;

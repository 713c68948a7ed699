//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every catalogue route, the health probes, and the
//! schema wrappers that document domain types without coupling them to the
//! utoipa framework. Swagger UI consumes the document in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::catalogue_items::{CatalogueItemBody, ResourceIdentity};
use crate::inbound::http::error::{ErrorBody, ErrorResponse};
use crate::inbound::http::schemas::CatalogueItemSchema;

/// OpenAPI document for the catalogue REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalogue service API",
        description = "Reactive CRUD interface for catalogue items, including a paced SSE streaming variant of the listing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue_items::get_catalogue_items,
        crate::inbound::http::catalogue_items::get_catalogue_items_stream,
        crate::inbound::http::catalogue_items::get_catalogue_item,
        crate::inbound::http::catalogue_items::add_catalogue_item,
        crate::inbound::http::catalogue_items::update_catalogue_item,
        crate::inbound::http::catalogue_items::remove_catalogue_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CatalogueItemSchema,
        CatalogueItemBody,
        ResourceIdentity,
        ErrorResponse,
        ErrorBody
    )),
    tags(
        (name = "catalogue-items", description = "Catalogue item CRUD operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

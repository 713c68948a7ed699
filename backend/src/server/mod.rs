//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use backend::RequestLog;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::CatalogueCrudService;
use backend::domain::ports::{CatalogueCrud, InMemoryItemStore};
use backend::inbound::http::catalogue_items::{
    add_catalogue_item, get_catalogue_item, get_catalogue_items, get_catalogue_items_stream,
    remove_catalogue_item, update_catalogue_item,
};
use backend::inbound::http::error::json_error_handler;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselItemStore;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the catalogue use-case implementation from configuration.
///
/// Uses the Diesel-backed store when a pool is available, otherwise the
/// in-memory fixture store.
fn build_catalogue(config: &ServerConfig) -> Arc<dyn CatalogueCrud> {
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => Arc::new(CatalogueCrudService::new(
            Arc::new(DieselItemStore::new(pool.clone())),
            clock,
        )),
        None => Arc::new(CatalogueCrudService::new(
            Arc::new(InMemoryItemStore::default()),
            clock,
        )),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(get_catalogue_items_stream)
        .service(get_catalogue_items)
        .service(add_catalogue_item)
        .service(get_catalogue_item)
        .service(update_catalogue_item)
        .service(remove_catalogue_item);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestLog)
        .wrap(NormalizePath::trim())
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let catalogue = build_catalogue(&config);
    let http_state = web::Data::new(HttpState::new(catalogue));

    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .bind(config.bind_addr)?
            .run();

    health_state.mark_ready();
    Ok(server)
}

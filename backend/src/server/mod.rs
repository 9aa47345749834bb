//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{AuthService, CatalogService, TokenSigner};
use crate::inbound::http::creatures::{
    create_creature, delete_creature, get_creature, list_creatures, update_creature,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register, whoami};
use crate::outbound::persistence::{
    DbPool, DieselCreatureRepository, DieselCredentialRepository,
};

/// Build the shared HTTP state over database-backed repositories.
#[must_use]
pub fn build_http_state(pool: &DbPool, jwt_secret: &str) -> web::Data<HttpState> {
    let credentials = Arc::new(DieselCredentialRepository::new(pool.clone()));
    let creatures = Arc::new(DieselCreatureRepository::new(pool.clone()));
    let auth = AuthService::new(credentials, TokenSigner::new(jwt_secret));
    let catalog = CatalogService::new(creatures, auth.clone());
    web::Data::new(HttpState::new(catalog, auth))
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
        .service(register)
        .service(login)
        .service(whoami)
        .service(list_creatures)
        .service(get_creature)
        .service(create_creature)
        .service(update_creature)
        .service(delete_creature);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct the HTTP server and mark readiness once it is listening.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

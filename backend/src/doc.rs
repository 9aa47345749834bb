//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every HTTP endpoint together with the schemas
//! they exchange and the bearer token security scheme. Swagger UI
//! serves the generated document in debug builds under `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Creature, Error, ErrorCode};
use crate::inbound::http::creatures::{
    CreateCreatureRequest, CreatureListResponse, UpdateCreatureRequest,
};
use crate::inbound::http::schemas::PageInfoSchema;
use crate::inbound::http::users::{CredentialsRequest, SessionResponse, WhoamiResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/v1/auth/register or /api/v1/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the creature catalog API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Creature catalog API",
        description = "Paginated creature catalog with token-authenticated editing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::creatures::list_creatures,
        crate::inbound::http::creatures::get_creature,
        crate::inbound::http::creatures::create_creature,
        crate::inbound::http::creatures::update_creature,
        crate::inbound::http::creatures::delete_creature,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::whoami,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Creature,
        Error,
        ErrorCode,
        PageInfoSchema,
        CreatureListResponse,
        CreateCreatureRequest,
        UpdateCreatureRequest,
        CredentialsRequest,
        SessionResponse,
        WhoamiResponse,
    )),
    tags(
        (name = "creatures", description = "Catalog listing, lookup, and editing"),
        (name = "auth", description = "Account registration and token handling"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

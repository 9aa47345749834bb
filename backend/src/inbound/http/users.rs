//! Account registration, login, and token introspection handlers.

use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{AuthSession, Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::presented_token;
use crate::inbound::http::state::HttpState;

/// Request body shared by registration and login.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account name; matched case-insensitively.
    #[schema(example = "ash")]
    pub username: String,
    /// Plaintext password; never stored.
    #[schema(example = "pikapika")]
    pub password: String,
}

/// Response for successful registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Signed bearer token valid for 24 hours.
    pub token: String,
    /// The stored (lowercased) username.
    #[schema(example = "ash")]
    pub username: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            username: session.username,
        }
    }
}

/// Response for token introspection.
#[derive(Debug, Serialize, ToSchema)]
pub struct WhoamiResponse {
    /// The username embedded in the verified token.
    #[schema(example = "ash")]
    pub username: String,
}

fn map_credentials_validation_error(error: &CredentialsValidationError) -> Error {
    let field = match error {
        CredentialsValidationError::EmptyUsername => "username",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": field, "code": "empty" }))
}

fn parse_credentials(request: &CredentialsRequest) -> Result<Credentials, Error> {
    Credentials::try_from_parts(&request.username, &request.password)
        .map_err(|err| map_credentials_validation_error(&err))
}

/// Create an account and mint its first token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Blank username or short password", body = Error),
        (status = 409, description = "Username already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<actix_web::HttpResponse> {
    let credentials = parse_credentials(&payload)?;
    let session = state.auth.register(&credentials).await?;
    Ok(actix_web::HttpResponse::Created().json(SessionResponse::from(session)))
}

/// Authenticate an existing account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Session minted", body = SessionResponse),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Unknown username or wrong password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials = parse_credentials(&payload)?;
    let session = state.auth.login(&credentials).await?;
    Ok(web::Json(SessionResponse::from(session)))
}

/// Report the account behind a presented token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/whoami",
    responses(
        (status = 200, description = "The token is valid", body = WhoamiResponse),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "whoami"
)]
#[get("/auth/whoami")]
pub async fn whoami(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<WhoamiResponse>> {
    let username = state.auth.authorize(presented_token(&req))?;
    Ok(web::Json(WhoamiResponse { username }))
}

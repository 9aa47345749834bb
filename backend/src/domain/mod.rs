//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed creature catalog and credential
//! model used by the HTTP and persistence layers. Types stay immutable
//! where possible and document their invariants and serialisation
//! contracts (serde) in each type's Rustdoc; services orchestrate the
//! ports without knowing anything about HTTP or SQL.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`Creature`], [`CreatureDraft`], [`CreaturePatch`] — the catalog
//!   aggregate and its write shapes.
//! - [`CreatureFilter`], [`Sort`] — list query primitives.
//! - [`CatalogService`], [`AuthService`] — the two domain services.
//! - [`ports`] — repository traits implemented by outbound adapters.

pub mod auth;
pub mod auth_service;
pub mod catalog;
pub mod creature;
pub mod error;
pub mod filter;
pub mod password;
pub mod ports;
pub mod sort;
pub mod token;

pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::auth_service::{AuthService, AuthSession, MIN_PASSWORD_CHARS};
pub use self::catalog::{CatalogPage, CatalogService};
pub use self::creature::{Creature, CreatureDraft, CreaturePatch, CreatureValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter::CreatureFilter;
pub use self::sort::{Sort, SortField, SortOrder};
pub use self::token::{TokenSigner, TOKEN_TTL_SECONDS};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such creature"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

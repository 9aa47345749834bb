//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they
//! only depend on the domain services and remain testable without I/O:
//! tests assemble the same state over stub repositories.

use crate::domain::{AuthService, CatalogService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalog reads and authenticated writes.
    pub catalog: CatalogService,
    /// Registration, login, and token verification.
    pub auth: AuthService,
}

impl HttpState {
    /// Construct state from the two domain services.
    pub fn new(catalog: CatalogService, auth: AuthService) -> Self {
        Self { catalog, auth }
    }
}

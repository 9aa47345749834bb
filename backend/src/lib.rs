//! Creature catalog backend.
//!
//! Hexagonal layout: `domain` holds the catalog and credential
//! services behind repository ports, `inbound` exposes them over HTTP,
//! and `outbound` implements the ports against PostgreSQL via Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;

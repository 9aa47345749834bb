//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel
//!   models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: database failures are mapped onto the
//!   persistence error enums the ports declare.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselCreatureRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/creatures");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselCreatureRepository::new(pool);
//! ```

mod diesel_creature_repository;
mod diesel_credential_repository;
mod models;
mod pool;
mod schema;
mod seeding;

pub use diesel_creature_repository::DieselCreatureRepository;
pub use diesel_credential_repository::DieselCredentialRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use seeding::{seed_demo_data, SeedError, SeedReport};

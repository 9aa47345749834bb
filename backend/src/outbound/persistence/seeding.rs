//! Demonstration data seeding.
//!
//! Applies the embedded creature and credential fixtures so a fresh
//! database has something to browse and accounts to log in with.
//! Creature fixtures are inserted only when the catalog is empty;
//! credential fixtures are upserted individually so re-running the
//! seed never clobbers a changed password hash.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::password::{hash_password, PasswordHashError};

use super::models::{NewCreatureRow, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::{creatures, credentials};

/// Errors raised while applying the demonstration fixtures.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The embedded fixture payload failed to decode.
    #[error(transparent)]
    Fixtures(#[from] seed_data::SeedDataError),
    /// Hashing a fixture password failed.
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    /// Store connectivity failures, including pool checkout.
    #[error("seeding connection failed: {message}")]
    Connection {
        /// Adapter-level description.
        message: String,
    },
    /// Catch-all for query failures during seeding.
    #[error("seeding query failed: {message}")]
    Query {
        /// Adapter-level description.
        message: String,
    },
}

/// What a seeding pass actually inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Creature fixtures inserted; zero when the catalog already had rows.
    pub creatures_inserted: usize,
    /// Credential fixtures inserted; existing accounts are left alone.
    pub credentials_inserted: usize,
}

fn map_pool_error(error: PoolError) -> SeedError {
    SeedError::Connection {
        message: error.into_message(),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SeedError {
    debug!(%error, "diesel operation failed");
    SeedError::Query {
        message: error.to_string(),
    }
}

/// Apply the embedded fixtures to the database behind `pool`.
///
/// Idempotent: a second run against the same database inserts nothing.
///
/// # Errors
///
/// Returns [`SeedError`] for fixture decoding, hashing, or database
/// failures. A partially applied pass is rolled back for creatures
/// (they share one transaction); credentials are inserted row by row
/// with conflict-free upserts, so no partial state is possible there
/// either.
pub async fn seed_demo_data(pool: &DbPool) -> Result<SeedReport, SeedError> {
    let fixtures = seed_data::seed_creatures()?;

    let mut hashed_credentials = Vec::with_capacity(seed_data::SEED_CREDENTIALS.len());
    for credential in seed_data::SEED_CREDENTIALS {
        hashed_credentials.push((credential.username, hash_password(credential.password)?));
    }

    let creature_rows: Vec<NewCreatureRow<'_>> = fixtures
        .iter()
        .map(|fixture| NewCreatureRow {
            id: Uuid::new_v4(),
            pokedex_number: Some(fixture.pokedex_number),
            name: &fixture.name,
            height: fixture.height,
            weight: fixture.weight,
            image_url: fixture.image_url.as_deref(),
            types: &fixture.types,
            weaknesses: &fixture.weaknesses,
            abilities: &fixture.abilities,
            category: fixture.category.as_deref(),
            description: fixture.description.as_deref(),
        })
        .collect();

    let mut conn = pool.get().await.map_err(map_pool_error)?;

    let report = conn
        .transaction(|conn| {
            async move {
                let existing: i64 = creatures::table.count().get_result(conn).await?;
                let creatures_inserted = if existing == 0 {
                    diesel::insert_into(creatures::table)
                        .values(&creature_rows)
                        .execute(conn)
                        .await?
                } else {
                    0
                };

                let mut credentials_inserted = 0;
                for (username, password_hash) in &hashed_credentials {
                    credentials_inserted += diesel::insert_into(credentials::table)
                        .values(&NewCredentialRow {
                            username,
                            password_hash,
                        })
                        .on_conflict(credentials::username)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                }

                Ok(SeedReport {
                    creatures_inserted,
                    credentials_inserted,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

    info!(
        creatures = report.creatures_inserted,
        credentials = report.credentials_inserted,
        "demo data seeding complete"
    );
    Ok(report)
}

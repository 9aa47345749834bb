//! PostgreSQL-backed credential repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    CredentialPersistenceError, CredentialRepository, StoredCredential,
};

use super::models::{CredentialRow, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::credentials;

/// Diesel-backed implementation of the credential persistence port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CredentialPersistenceError {
    CredentialPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CredentialPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(%other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CredentialPersistenceError::connection("database connection error")
        }
        other => CredentialPersistenceError::query(other.to_string()),
    }
}

/// Insert-specific mapping: the primary key collision becomes the
/// dedicated duplicate-username variant.
fn map_insert_error(error: diesel::result::Error, username: &str) -> CredentialPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return CredentialPersistenceError::DuplicateUsername {
            username: username.to_owned(),
        };
    }
    map_diesel_error(error)
}

fn row_to_credential(row: CredentialRow) -> StoredCredential {
    StoredCredential::new(row.username, row.password_hash)
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, CredentialPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CredentialRow> = credentials::table
            .filter(credentials::username.eq(username))
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_credential))
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCredentialRow {
            username,
            password_hash,
        };
        let inserted: CredentialRow = diesel::insert_into(credentials::table)
            .values(&new_row)
            .returning(CredentialRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, username))?;
        Ok(row_to_credential(inserted))
    }
}

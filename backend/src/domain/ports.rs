//! Domain ports defining the edges of the service.
//!
//! Ports describe how the domain expects to interact with the backing
//! store. Each trait exposes strongly typed errors so adapters map
//! their failures into predictable variants instead of returning
//! `anyhow::Result`.

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;
use uuid::Uuid;

use super::creature::{Creature, CreatureDraft, CreaturePatch};
use super::filter::CreatureFilter;
use super::sort::Sort;

/// One page of creatures plus the filtered total.
///
/// `total_count` counts every creature matching the filter, independent
/// of the requested window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreaturePage {
    /// The creatures inside the requested window, in sort order.
    pub items: Vec<Creature>,
    /// Count of all filtered creatures.
    pub total_count: u64,
}

/// Errors surfaced by the creature persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreaturePersistenceError {
    /// Store connectivity failures, including pool checkout.
    #[error("creature store connection failed: {message}")]
    Connection {
        /// Adapter-level description.
        message: String,
    },
    /// The sparse uniqueness constraint on pokedex numbers was hit.
    #[error("pokedex number {number} is already assigned")]
    DuplicatePokedexNumber {
        /// The conflicting number.
        number: i32,
    },
    /// Catch-all for query failures that bubble up from the adapter.
    #[error("creature store query failed: {message}")]
    Query {
        /// Adapter-level description.
        message: String,
    },
}

impl CreaturePersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the credential persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialPersistenceError {
    /// Store connectivity failures, including pool checkout.
    #[error("credential store connection failed: {message}")]
    Connection {
        /// Adapter-level description.
        message: String,
    },
    /// The lowercase-username uniqueness constraint was hit.
    #[error("username {username} is already taken")]
    DuplicateUsername {
        /// The conflicting (lowercased) username.
        username: String,
    },
    /// Catch-all for query failures that bubble up from the adapter.
    #[error("credential store query failed: {message}")]
    Query {
        /// Adapter-level description.
        message: String,
    },
}

impl CredentialPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A persisted credential as the auth subsystem sees it.
///
/// The hash never leaves the auth subsystem; this type deliberately
/// has no serde derives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    username: String,
    password_hash: String,
}

impl StoredCredential {
    /// Assemble a credential from stored column values.
    #[must_use]
    pub const fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// The stored (lowercased) username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// The stored bcrypt hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// Persistence port for the creature collection.
#[async_trait]
pub trait CreatureRepository: Send + Sync {
    /// Filtered count plus the requested window, both observing one
    /// store snapshot.
    async fn list(
        &self,
        filter: &CreatureFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<CreaturePage, CreaturePersistenceError>;

    /// Look up by native id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Creature>, CreaturePersistenceError>;

    /// Look up by pokedex number.
    async fn find_by_pokedex_number(
        &self,
        number: i32,
    ) -> Result<Option<Creature>, CreaturePersistenceError>;

    /// Persist a new creature; the store assigns id and timestamps.
    async fn insert(&self, draft: CreatureDraft) -> Result<Creature, CreaturePersistenceError>;

    /// Apply a partial update to an existing creature.
    ///
    /// Returns `Ok(None)` when the row no longer exists.
    async fn update(
        &self,
        id: Uuid,
        patch: CreaturePatch,
    ) -> Result<Option<Creature>, CreaturePersistenceError>;

    /// Remove a creature, reporting whether a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CreaturePersistenceError>;
}

/// Persistence port for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Look up by lowercased username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, CredentialPersistenceError>;

    /// Persist a new credential; the store assigns timestamps.
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialPersistenceError>;
}

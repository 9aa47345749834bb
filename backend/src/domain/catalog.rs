//! Catalog service orchestrating reads and authenticated writes.
//!
//! Reads compose the filter, sort, and pagination primitives into a
//! single repository call; single-item reads and all writes go through
//! dual-key identifier resolution (native id first, pokedex number as
//! the fallback). Every mutating operation passes the authorisation
//! gate before any other validation.

use std::sync::Arc;

use pagination::{PageInfo, PageRequest};
use uuid::Uuid;

use super::auth_service::AuthService;
use super::creature::{Creature, CreatureDraft, CreaturePatch};
use super::error::Error;
use super::filter::CreatureFilter;
use super::ports::{CreaturePersistenceError, CreatureRepository};
use super::sort::Sort;

const CREATURE_NOT_FOUND: &str = "creature not found";

/// A page of catalog results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// The creatures inside the requested window, in sort order.
    pub items: Vec<Creature>,
    /// Count of all filtered creatures, independent of paging.
    pub total_count: u64,
    /// Derived window metadata.
    pub page_info: PageInfo,
}

/// Read and write operations over the creature collection.
#[derive(Clone)]
pub struct CatalogService {
    creatures: Arc<dyn CreatureRepository>,
    auth: AuthService,
}

fn map_creature_error(error: CreaturePersistenceError) -> Error {
    match error {
        CreaturePersistenceError::DuplicatePokedexNumber { number } => {
            Error::conflict(format!("pokedex number {number} is already assigned"))
        }
        CreaturePersistenceError::Connection { message }
        | CreaturePersistenceError::Query { message } => Error::store(message),
    }
}

impl CatalogService {
    /// Create a service over a creature repository and the auth gate.
    pub fn new(creatures: Arc<dyn CreatureRepository>, auth: AuthService) -> Self {
        Self { creatures, auth }
    }

    /// Paginated, filtered, sorted listing. No authentication required.
    ///
    /// # Errors
    ///
    /// [`Error::invalid_request`] for a page size outside {10, 20, 50}
    /// or a zero page; [`Error::store`] for persistence failures.
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
        sort: Sort,
        filter: &CreatureFilter,
    ) -> Result<CatalogPage, Error> {
        let request = PageRequest::new(page, page_size)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let fetched = self
            .creatures
            .list(filter, sort, request)
            .await
            .map_err(map_creature_error)?;

        let page_info = PageInfo::compute(&request, fetched.total_count);
        Ok(CatalogPage {
            items: fetched.items,
            total_count: fetched.total_count,
            page_info,
        })
    }

    /// Single-item lookup by external id. No authentication required.
    ///
    /// # Errors
    ///
    /// [`Error::not_found`] when neither key space matches.
    pub async fn get(&self, external_id: &str) -> Result<Creature, Error> {
        self.resolve(external_id)
            .await?
            .ok_or_else(|| Error::not_found(CREATURE_NOT_FOUND))
    }

    /// Create a creature. Requires a valid token.
    ///
    /// # Errors
    ///
    /// [`Error::unauthorized`] before anything else for a bad token;
    /// [`Error::invalid_request`] for draft validation failures;
    /// [`Error::conflict`] for a duplicate pokedex number.
    pub async fn create(&self, token: &str, draft: CreatureDraft) -> Result<Creature, Error> {
        let _username = self.auth.authorize(token)?;
        let draft = draft
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.creatures
            .insert(draft)
            .await
            .map_err(map_creature_error)
    }

    /// Partially update a creature resolved by external id.
    ///
    /// Only the fields present in `patch` change; omitted fields are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// [`Error::unauthorized`], [`Error::invalid_request`],
    /// [`Error::not_found`], [`Error::conflict`] per the gate, patch
    /// validation, resolution, and store constraints respectively.
    pub async fn update(
        &self,
        token: &str,
        external_id: &str,
        patch: CreaturePatch,
    ) -> Result<Creature, Error> {
        let _username = self.auth.authorize(token)?;
        let patch = patch
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let target = self
            .resolve(external_id)
            .await?
            .ok_or_else(|| Error::not_found(CREATURE_NOT_FOUND))?;

        self.creatures
            .update(target.id(), patch)
            .await
            .map_err(map_creature_error)?
            // The row can vanish between resolution and the write; the
            // caller sees the same not-found either way.
            .ok_or_else(|| Error::not_found(CREATURE_NOT_FOUND))
    }

    /// Delete a creature resolved by external id.
    ///
    /// # Errors
    ///
    /// [`Error::unauthorized`] for a bad token, [`Error::not_found`]
    /// when resolution fails.
    pub async fn delete(&self, token: &str, external_id: &str) -> Result<(), Error> {
        let _username = self.auth.authorize(token)?;
        let target = self
            .resolve(external_id)
            .await?
            .ok_or_else(|| Error::not_found(CREATURE_NOT_FOUND))?;

        let deleted = self
            .creatures
            .delete(target.id())
            .await
            .map_err(map_creature_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(CREATURE_NOT_FOUND))
        }
    }

    /// Dual-key identifier resolution.
    ///
    /// Native id lookup runs first when the string parses as a UUID; a
    /// miss (or a non-UUID string) falls through to a base-10 pokedex
    /// number lookup. Get, update, and delete all share this path.
    async fn resolve(&self, external_id: &str) -> Result<Option<Creature>, Error> {
        if let Ok(native_id) = Uuid::parse_str(external_id) {
            let found = self
                .creatures
                .find_by_id(native_id)
                .await
                .map_err(map_creature_error)?;
            if found.is_some() {
                return Ok(found);
            }
        }

        if let Ok(number) = external_id.trim().parse::<i32>() {
            return self
                .creatures
                .find_by_pokedex_number(number)
                .await
                .map_err(map_creature_error);
        }

        Ok(None)
    }
}

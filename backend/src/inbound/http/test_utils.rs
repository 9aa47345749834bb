//! In-memory test doubles shared by HTTP handler tests.
//!
//! These stubs implement the persistence ports over plain collections
//! so handler tests exercise the full service path without PostgreSQL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{
    CreaturePage, CreaturePersistenceError, CreatureRepository, CredentialPersistenceError,
    CredentialRepository, StoredCredential,
};
use crate::domain::{
    AuthService, CatalogService, Creature, CreatureDraft, CreatureFilter, CreaturePatch, Sort,
    SortField, SortOrder, TokenSigner,
};

use super::state::HttpState;

/// Shared signing secret for handler tests.
pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct InMemoryCreatures {
    rows: Mutex<Vec<Creature>>,
}

impl InMemoryCreatures {
    /// Seed a creature directly, bypassing the HTTP surface.
    pub fn insert_creature(&self, draft: CreatureDraft) -> Creature {
        let now = Utc::now();
        let creature =
            Creature::from_store(Uuid::new_v4(), draft, now, now).expect("valid test draft");
        self.rows.lock().expect("rows lock").push(creature.clone());
        creature
    }
}

fn matches(creature: &Creature, filter: &CreatureFilter) -> bool {
    if let Some(name) = &filter.name
        && !creature
            .name()
            .to_lowercase()
            .contains(&name.to_lowercase())
    {
        return false;
    }
    if let Some(min) = filter.min_height
        && creature.height() < min
    {
        return false;
    }
    if let Some(max) = filter.max_height
        && creature.height() > max
    {
        return false;
    }
    if let Some(min) = filter.min_weight
        && creature.weight() < min
    {
        return false;
    }
    if let Some(max) = filter.max_weight
        && creature.weight() > max
    {
        return false;
    }
    if let Some(kind) = &filter.kind {
        let needle = kind.to_lowercase();
        if !creature
            .types()
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
        {
            return false;
        }
    }
    true
}

fn apply_sort(rows: &mut [Creature], sort: Sort) {
    rows.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Name => a.name().cmp(b.name()),
            SortField::Height => a.height().cmp(&b.height()),
            SortField::Weight => a.weight().cmp(&b.weight()),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[async_trait]
impl CreatureRepository for InMemoryCreatures {
    async fn list(
        &self,
        filter: &CreatureFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<CreaturePage, CreaturePersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        let mut filtered: Vec<Creature> =
            rows.iter().filter(|c| matches(c, filter)).cloned().collect();
        apply_sort(&mut filtered, sort);
        let total_count = filtered.len() as u64;
        let items = filtered
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(0))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .collect();
        Ok(CreaturePage { items, total_count })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Creature>, CreaturePersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_by_pokedex_number(
        &self,
        number: i32,
    ) -> Result<Option<Creature>, CreaturePersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows
            .iter()
            .find(|c| c.pokedex_number() == Some(number))
            .cloned())
    }

    async fn insert(&self, draft: CreatureDraft) -> Result<Creature, CreaturePersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if let Some(number) = draft.pokedex_number
            && rows.iter().any(|c| c.pokedex_number() == Some(number))
        {
            return Err(CreaturePersistenceError::DuplicatePokedexNumber { number });
        }
        let now = Utc::now();
        let creature = Creature::from_store(Uuid::new_v4(), draft, now, now)
            .map_err(|err| CreaturePersistenceError::query(err.to_string()))?;
        rows.push(creature.clone());
        Ok(creature)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: CreaturePatch,
    ) -> Result<Option<Creature>, CreaturePersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let Some(slot) = rows.iter_mut().find(|c| c.id() == id) else {
            return Ok(None);
        };
        let existing = slot.clone();
        let draft = CreatureDraft {
            pokedex_number: existing.pokedex_number(),
            name: patch.name.unwrap_or_else(|| existing.name().to_owned()),
            height: patch.height.unwrap_or_else(|| existing.height()),
            weight: patch.weight.unwrap_or_else(|| existing.weight()),
            image_url: patch
                .image_url
                .or_else(|| existing.image_url().map(str::to_owned)),
            types: patch.types.unwrap_or_else(|| existing.types().to_vec()),
            weaknesses: patch
                .weaknesses
                .unwrap_or_else(|| existing.weaknesses().to_vec()),
            abilities: patch
                .abilities
                .unwrap_or_else(|| existing.abilities().to_vec()),
            category: patch
                .category
                .or_else(|| existing.category().map(str::to_owned)),
            description: patch
                .description
                .or_else(|| existing.description().map(str::to_owned)),
        };
        let updated = Creature::from_store(id, draft, existing.created_at(), Utc::now())
            .map_err(|err| CreaturePersistenceError::query(err.to_string()))?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CreaturePersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let before = rows.len();
        rows.retain(|c| c.id() != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryCredentials {
    rows: Mutex<HashMap<String, StoredCredential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentials {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, CredentialPersistenceError> {
        Ok(self.rows.lock().expect("rows lock").get(username).cloned())
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialPersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if rows.contains_key(username) {
            return Err(CredentialPersistenceError::DuplicateUsername {
                username: username.to_owned(),
            });
        }
        let stored = StoredCredential::new(username.to_owned(), password_hash.to_owned());
        rows.insert(username.to_owned(), stored.clone());
        Ok(stored)
    }
}

/// Stub-backed state plus handles for seeding test data.
pub fn test_state() -> (Arc<InMemoryCreatures>, Arc<InMemoryCredentials>, web::Data<HttpState>) {
    let creatures = Arc::new(InMemoryCreatures::default());
    let credentials = Arc::new(InMemoryCredentials::default());
    let auth = AuthService::new(credentials.clone(), TokenSigner::new(TEST_SECRET));
    let catalog = CatalogService::new(creatures.clone(), auth.clone());
    let state = web::Data::new(HttpState::new(catalog, auth));
    (creatures, credentials, state)
}

/// A token the test state accepts.
pub fn valid_token() -> String {
    TokenSigner::new(TEST_SECRET)
        .mint("ash")
        .expect("mint succeeds")
}

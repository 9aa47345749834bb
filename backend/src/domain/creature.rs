//! Creature aggregate: the catalog's primary entity.
//!
//! A [`CreatureDraft`] is the validated input for creation, a
//! [`CreaturePatch`] carries partial updates (absent fields are left
//! untouched), and a [`Creature`] is the store-owned entity with its
//! native identity and audit timestamps.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors shared by drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreatureValidationError {
    /// The name was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// The type list was present but empty.
    #[error("at least one type is required")]
    EmptyTypes,
}

/// Input payload for creating a creature.
///
/// ## Invariants (checked by [`CreatureDraft::validated`])
/// - `name` is non-empty after trimming and stored trimmed.
/// - `types` holds at least one entry.
///
/// `pokedex_number` is optional; uniqueness among present values is
/// enforced by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureDraft {
    /// Optional alternate human-facing key.
    pub pokedex_number: Option<i32>,
    /// Display name.
    pub name: String,
    /// Height as an opaque integer; no unit is asserted.
    pub height: i32,
    /// Weight as an opaque integer; no unit is asserted.
    pub weight: i32,
    /// Sprite or artwork URL.
    pub image_url: Option<String>,
    /// Elemental types, ordered, at least one.
    pub types: Vec<String>,
    /// Type weaknesses, ordered, possibly empty.
    pub weaknesses: Vec<String>,
    /// Abilities, ordered, possibly empty.
    pub abilities: Vec<String>,
    /// Species category label.
    pub category: Option<String>,
    /// Flavour text.
    pub description: Option<String>,
}

impl CreatureDraft {
    /// Trim the name and enforce the write-time invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CreatureValidationError::EmptyName`] or
    /// [`CreatureValidationError::EmptyTypes`].
    pub fn validated(mut self) -> Result<Self, CreatureValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CreatureValidationError::EmptyName);
        }
        if self.types.is_empty() {
            return Err(CreatureValidationError::EmptyTypes);
        }
        self.name = trimmed.to_owned();
        Ok(self)
    }
}

/// Partial update for a creature.
///
/// Only fields that are `Some` are applied; everything else keeps its
/// stored value. Presence of an empty `types` list is rejected so the
/// "at least one type" invariant holds for updates too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreaturePatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement height.
    pub height: Option<i32>,
    /// Replacement weight.
    pub weight: Option<i32>,
    /// Replacement image URL.
    pub image_url: Option<String>,
    /// Replacement type list.
    pub types: Option<Vec<String>>,
    /// Replacement weakness list.
    pub weaknesses: Option<Vec<String>>,
    /// Replacement ability list.
    pub abilities: Option<Vec<String>>,
    /// Replacement category label.
    pub category: Option<String>,
    /// Replacement flavour text.
    pub description: Option<String>,
}

impl CreaturePatch {
    /// Trim a supplied name and enforce the write-time invariants on the
    /// fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`CreatureValidationError::EmptyName`] or
    /// [`CreatureValidationError::EmptyTypes`].
    pub fn validated(mut self) -> Result<Self, CreatureValidationError> {
        if let Some(name) = self.name.take() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(CreatureValidationError::EmptyName);
            }
            self.name = Some(trimmed.to_owned());
        }
        if let Some(types) = &self.types
            && types.is_empty()
        {
            return Err(CreatureValidationError::EmptyTypes);
        }
        Ok(self)
    }

    /// True when no field is supplied; an empty patch still bumps the
    /// entity's `updated_at` when applied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.image_url.is_none()
            && self.types.is_none()
            && self.weaknesses.is_none()
            && self.abilities.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

/// Store-owned creature entity.
///
/// Constructed by persistence adapters from stored rows; the native id
/// and timestamps are assigned by the store and immutable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pokedex_number: Option<i32>,
    name: String,
    height: i32,
    weight: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    types: Vec<String>,
    weaknesses: Vec<String>,
    abilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Creature {
    /// Assemble an entity from store-assigned metadata and a validated
    /// draft.
    ///
    /// # Errors
    ///
    /// Re-runs draft validation so a row that was corrupted out of band
    /// cannot produce an invariant-breaking entity.
    pub fn from_store(
        id: Uuid,
        draft: CreatureDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, CreatureValidationError> {
        let draft = draft.validated()?;
        Ok(Self {
            id,
            pokedex_number: draft.pokedex_number,
            name: draft.name,
            height: draft.height,
            weight: draft.weight,
            image_url: draft.image_url,
            types: draft.types,
            weaknesses: draft.weaknesses,
            abilities: draft.abilities,
            category: draft.category,
            description: draft.description,
            created_at,
            updated_at,
        })
    }

    /// Store-assigned native identity.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Alternate human-facing key, when assigned.
    #[must_use]
    pub const fn pokedex_number(&self) -> Option<i32> {
        self.pokedex_number
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Height as stored; units are a presentation concern.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Weight as stored; units are a presentation concern.
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Sprite or artwork URL.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Ordered elemental types; never empty.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Ordered weaknesses; possibly empty.
    #[must_use]
    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    /// Ordered abilities; possibly empty.
    #[must_use]
    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    /// Species category label.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Flavour text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Creation timestamp assigned by the store.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-mutation timestamp assigned by the store.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

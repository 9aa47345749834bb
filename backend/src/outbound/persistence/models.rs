//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! must never be exposed to the domain. They exist solely to satisfy
//! Diesel's type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{creatures, credentials};

/// Row struct for reading from the creatures table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = creatures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CreatureRow {
    pub id: Uuid,
    pub pokedex_number: Option<i32>,
    pub name: String,
    pub height: i32,
    pub weight: i32,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub weaknesses: Vec<String>,
    pub abilities: Vec<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new creature records.
///
/// The database assigns `created_at` and `updated_at` defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = creatures)]
pub(crate) struct NewCreatureRow<'a> {
    pub id: Uuid,
    pub pokedex_number: Option<i32>,
    pub name: &'a str,
    pub height: i32,
    pub weight: i32,
    pub image_url: Option<&'a str>,
    pub types: &'a [String],
    pub weaknesses: &'a [String],
    pub abilities: &'a [String],
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Changeset struct for partial creature updates.
///
/// `Option` fields follow Diesel changeset semantics: `None` leaves the
/// column untouched, which is exactly the patch contract. `updated_at`
/// is always set, so an otherwise empty patch still produces a valid
/// UPDATE and bumps the audit timestamp.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = creatures)]
pub(crate) struct CreatureChangeset {
    pub name: Option<String>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub image_url: Option<String>,
    pub types: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
    pub abilities: Option<Vec<String>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the credentials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub username: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new credential records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credentials)]
pub(crate) struct NewCredentialRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They
//! are used by Diesel for compile-time query validation and type-safe
//! SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated
//! or manually updated to reflect those changes. The
//! `diesel print-schema` command can generate these definitions from a
//! live database.

diesel::table! {
    /// Creature catalog table.
    ///
    /// A partial unique index guarantees `pokedex_number` uniqueness
    /// among non-null values only.
    creatures (id) {
        /// Primary key: UUID v4 identifier assigned on insert.
        id -> Uuid,
        /// Optional alternate human-facing key.
        pokedex_number -> Nullable<Int4>,
        /// Display name, non-empty.
        name -> Varchar,
        /// Height as an opaque integer.
        height -> Int4,
        /// Weight as an opaque integer.
        weight -> Int4,
        /// Sprite or artwork URL.
        image_url -> Nullable<Text>,
        /// Elemental types, at least one element.
        types -> Array<Text>,
        /// Type weaknesses, possibly empty.
        weaknesses -> Array<Text>,
        /// Abilities, possibly empty.
        abilities -> Array<Text>,
        /// Species category label.
        category -> Nullable<Varchar>,
        /// Flavour text.
        description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Account credentials table.
    ///
    /// Usernames are stored lowercased; the primary key enforces
    /// uniqueness under that normalisation.
    credentials (username) {
        /// Primary key: lowercased username.
        username -> Varchar,
        /// bcrypt hash of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

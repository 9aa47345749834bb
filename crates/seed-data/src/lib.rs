//! Embedded creature and credential fixtures for demonstration seeding.
//!
//! The backend can bulk-insert these rows at startup so a fresh database
//! has something to browse. The types here are deliberately independent
//! of backend domain types to avoid circular dependencies; the backend
//! converts them into its own drafts at the point of use.
//!
//! # Example
//!
//! ```
//! let creatures = seed_data::seed_creatures().expect("embedded fixtures parse");
//! assert_eq!(creatures.len(), 10);
//! assert!(creatures.iter().any(|c| c.name == "Pikachu"));
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Embedded fixture payload, checked into the repository as JSON.
const CREATURES_JSON: &str = include_str!("../data/creatures.json");

/// Errors raised while decoding the embedded fixture payload.
#[derive(Debug, Error)]
pub enum SeedDataError {
    /// The embedded JSON failed to parse.
    #[error("embedded creature fixtures are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A creature fixture row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCreature {
    /// Pokedex number; unique among the fixtures.
    pub pokedex_number: i32,
    /// Display name.
    pub name: String,
    /// Height as an opaque integer; no unit is asserted.
    pub height: i32,
    /// Weight as an opaque integer; no unit is asserted.
    pub weight: i32,
    /// Sprite URL.
    pub image_url: Option<String>,
    /// Elemental types, at least one.
    pub types: Vec<String>,
    /// Type weaknesses.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Abilities.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Species category label.
    pub category: Option<String>,
    /// Flavour text.
    pub description: Option<String>,
}

/// A credential fixture with its plaintext password.
///
/// Passwords are hashed by the seeding collaborator at insert time, the
/// same way a live registration would hash them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCredential {
    /// Account username, already lowercase.
    pub username: &'static str,
    /// Plaintext password for demonstration logins.
    pub password: &'static str,
}

/// Demonstration login accounts.
pub const SEED_CREDENTIALS: [SeedCredential; 2] = [
    SeedCredential {
        username: "admin",
        password: "admin123",
    },
    SeedCredential {
        username: "user",
        password: "user123",
    },
];

/// Decode the embedded creature fixtures.
///
/// # Errors
///
/// Returns [`SeedDataError::Malformed`] if the embedded JSON does not
/// match [`SeedCreature`]; this indicates a broken checkout rather than
/// a runtime condition.
pub fn seed_creatures() -> Result<Vec<SeedCreature>, SeedDataError> {
    Ok(serde_json::from_str(CREATURES_JSON)?)
}

#[cfg(test)]
mod tests {
    //! Fixture integrity checks.
    use std::collections::HashSet;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixtures_parse_and_hold_ten_creatures() {
        let creatures = seed_creatures().expect("fixtures parse");
        assert_eq!(creatures.len(), 10);
    }

    #[rstest]
    fn pokedex_numbers_are_unique() {
        let creatures = seed_creatures().expect("fixtures parse");
        let numbers: HashSet<i32> = creatures.iter().map(|c| c.pokedex_number).collect();
        assert_eq!(numbers.len(), creatures.len());
    }

    #[rstest]
    fn every_fixture_has_at_least_one_type_and_a_name() {
        for creature in seed_creatures().expect("fixtures parse") {
            assert!(!creature.types.is_empty(), "{} has no types", creature.name);
            assert!(!creature.name.trim().is_empty());
        }
    }

    #[rstest]
    fn seed_credentials_are_lowercase() {
        for credential in SEED_CREDENTIALS {
            assert_eq!(credential.username, credential.username.to_lowercase());
        }
    }
}

//! Password hashing and verification.
//!
//! bcrypt with a fixed cost factor. The hash embeds its own salt, so
//! verification needs only the stored string; a stored hash that fails
//! to parse is treated as a verification failure rather than an error,
//! which keeps login failure modes indistinguishable to callers.

use thiserror::Error;

/// Fixed bcrypt cost factor.
pub const HASH_COST: u32 = 10;

/// Errors raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// The hashing primitive itself failed.
    #[error("failed to hash password: {message}")]
    Hash {
        /// Underlying bcrypt message.
        message: String,
    },
}

/// Hash a plaintext password with a per-call random salt.
///
/// # Errors
///
/// Returns [`PasswordHashError::Hash`] if bcrypt fails.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    bcrypt::hash(password, HASH_COST).map_err(|err| PasswordHashError::Hash {
        message: err.to_string(),
    })
}

/// Check a plaintext password against a stored hash.
///
/// Unparseable stored hashes verify as `false`.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}

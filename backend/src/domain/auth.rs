//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing
//! constructors that validate string inputs before a handler talks to
//! a service. Usernames are normalised to lowercase here so every
//! comparison downstream is case-insensitive by construction.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated credentials used by registration and login.
///
/// ## Invariants
/// - `username` is trimmed, lowercased, and non-empty.
/// - `password` is non-empty but otherwise kept exactly as supplied so
///   hashing and verification see the caller's bytes.
///
/// # Examples
/// ```
/// use backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("  Ash  ", "pikapika").unwrap();
/// assert_eq!(creds.username(), "ash");
/// assert_eq!(creds.password(), "pikapika");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsValidationError`] when either part is blank.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Lowercased username suitable for credential lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as the caller supplied it.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

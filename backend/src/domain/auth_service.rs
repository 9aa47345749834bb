//! Credential subsystem: registration, login, and the stateless token
//! gate used by every mutating catalog operation.

use std::sync::Arc;

use serde_json::json;

use super::auth::Credentials;
use super::error::Error;
use super::password::{hash_password, verify_password};
use super::ports::{CredentialPersistenceError, CredentialRepository};
use super::token::TokenSigner;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Message for failed logins.
///
/// Identical whether the username is unknown or the password is wrong,
/// so a caller cannot probe which usernames exist.
const LOGIN_FAILED: &str = "invalid username or password";

/// Message for rejected or missing tokens on mutating operations.
const AUTH_REQUIRED: &str = "authentication required: invalid or expired token";

/// A freshly minted token together with the authenticated username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Signed token valid for 24 hours.
    pub token: String,
    /// The stored (lowercased) username.
    pub username: String,
}

/// Registration, login, and token verification.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialRepository>,
    tokens: TokenSigner,
}

fn map_credential_error(error: CredentialPersistenceError) -> Error {
    match error {
        CredentialPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("username already exists")
        }
        CredentialPersistenceError::Connection { message }
        | CredentialPersistenceError::Query { message } => Error::store(message),
    }
}

impl AuthService {
    /// Create a service backed by a credential repository and signer.
    pub fn new(credentials: Arc<dyn CredentialRepository>, tokens: TokenSigner) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// Register a new account and mint its first token.
    ///
    /// # Errors
    ///
    /// - [`Error::conflict`] when the lowercased username is taken.
    /// - [`Error::invalid_request`] when the password is shorter than
    ///   [`MIN_PASSWORD_CHARS`].
    /// - [`Error::store`] for persistence or hashing failures.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        let existing = self
            .credentials
            .find_by_username(credentials.username())
            .await
            .map_err(map_credential_error)?;
        if existing.is_some() {
            return Err(Error::conflict("username already exists"));
        }

        if credentials.password().chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::invalid_request(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters long"
            ))
            .with_details(json!({ "field": "password", "code": "too_short" })));
        }

        let password_hash = hash_password(credentials.password())
            .map_err(|err| Error::store(err.to_string()))?;
        let stored = self
            .credentials
            .insert(credentials.username(), &password_hash)
            .await
            .map_err(map_credential_error)?;

        self.session_for(stored.username())
    }

    /// Authenticate an existing account and mint a token.
    ///
    /// # Errors
    ///
    /// [`Error::unauthorized`] with one fixed message for both unknown
    /// usernames and wrong passwords; [`Error::store`] for persistence
    /// failures.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        let stored = self
            .credentials
            .find_by_username(credentials.username())
            .await
            .map_err(map_credential_error)?
            .ok_or_else(|| Error::unauthorized(LOGIN_FAILED))?;

        if !verify_password(credentials.password(), stored.password_hash()) {
            return Err(Error::unauthorized(LOGIN_FAILED));
        }

        self.session_for(stored.username())
    }

    /// Validate a presented token, returning the embedded username.
    ///
    /// Malformed, forged, and expired tokens all yield `None`.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<String> {
        self.tokens.verify(token)
    }

    /// Authorisation gate for mutating operations.
    ///
    /// # Errors
    ///
    /// [`Error::unauthorized`] when [`Self::verify`] fails; mutating
    /// operations call this before any other validation.
    pub fn authorize(&self, token: &str) -> Result<String, Error> {
        self.verify(token)
            .ok_or_else(|| Error::unauthorized(AUTH_REQUIRED))
    }

    fn session_for(&self, username: &str) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .mint(username)
            .map_err(|err| Error::store(err.to_string()))?;
        Ok(AuthSession {
            token,
            username: username.to_owned(),
        })
    }
}

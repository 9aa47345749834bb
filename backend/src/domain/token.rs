//! Stateless signed tokens asserting an authenticated username.
//!
//! Tokens are HS256 JWTs with a fixed 24-hour lifetime. There is no
//! revocation list: once minted, a token stays valid until it expires
//! or the signing secret changes.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime in seconds (24 hours).
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    /// The authenticated (lowercased) username.
    sub: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Errors raised while minting a token.
///
/// Verification never errors; malformed or expired tokens simply fail
/// to verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signing operation itself failed.
    #[error("failed to sign token: {message}")]
    Mint {
        /// Underlying signer message.
        message: String,
    },
}

/// Mints and verifies the service's stateless tokens.
///
/// # Examples
/// ```
/// use backend::domain::TokenSigner;
///
/// let signer = TokenSigner::new("secret");
/// let token = signer.mint("ash").expect("mint succeeds");
/// assert_eq!(signer.verify(&token).as_deref(), Some("ash"));
/// assert_eq!(signer.verify("garbage"), None);
/// ```
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Build a signer from the shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a token for the given username, valid for
    /// [`TOKEN_TTL_SECONDS`] from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Mint`] if signing fails.
    pub fn mint(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_owned(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(|err| {
            TokenError::Mint {
                message: err.to_string(),
            }
        })
    }

    /// Validate signature and expiry, returning the embedded username.
    ///
    /// Returns `None` on any malformation, bad signature, or expiry;
    /// malformed input is reported as failure, never as a panic or
    /// propagated error.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<String> {
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

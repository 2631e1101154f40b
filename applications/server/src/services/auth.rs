/// Authentication services - password hashing and session tokens
use crate::error::{Result, ServerError, GENERIC_INTERNAL_MESSAGE};
use chrono::{DateTime, Duration, Utc};
use freight_core::{CredentialClaims, FreightError, Identity, Outcome};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session tokens expire this many seconds after issuance
pub const SESSION_TOKEN_TTL_SECS: i64 = 7200;

/// Shorter than any bcrypt output; anything below this means the backend is broken
const MIN_PLAUSIBLE_HASH_LEN: usize = 32;

/// Hashing backend: `(password, cost) -> hash`
pub type HashFn = fn(&str, u32) -> bcrypt::BcryptResult<String>;

/// Salted bcrypt hashing and verification of user passwords
#[derive(Debug, Clone)]
pub struct CredentialStore {
    cost: u32,
    hasher: HashFn,
}

impl CredentialStore {
    pub fn new(cost: u32) -> Self {
        Self::with_hasher(cost, bcrypt_hash)
    }

    /// Store backed by a custom hashing function. Verification is always bcrypt.
    pub fn with_hasher(cost: u32, hasher: HashFn) -> Self {
        Self { cost, hasher }
    }

    /// Hash a password using bcrypt with a fresh random salt
    pub fn hash(&self, password: &str) -> Outcome<String> {
        let hash = (self.hasher)(password, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            FreightError::internal(GENERIC_INTERNAL_MESSAGE)
        })?;

        ensure_plausible(&hash)?;

        Ok(hash)
    }

    /// Verify a password against a stored hash
    ///
    /// A stored hash that bcrypt cannot parse is store corruption and is
    /// reported as an internal error rather than a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> Outcome<bool> {
        bcrypt::verify(password, hash).map_err(|e| {
            tracing::error!(error = %e, "Stored password hash could not be verified");
            FreightError::internal(GENERIC_INTERNAL_MESSAGE)
        })
    }
}

fn bcrypt_hash(password: &str, cost: u32) -> bcrypt::BcryptResult<String> {
    bcrypt::hash(password, cost)
}

/// Reject hashing output too short to be a real hash
fn ensure_plausible(hash: &str) -> Outcome<()> {
    if hash.len() < MIN_PLAUSIBLE_HASH_LEN {
        tracing::error!(length = hash.len(), "Password hashing produced an implausible hash");
        return Err(FreightError::internal(GENERIC_INTERNAL_MESSAGE));
    }
    Ok(())
}

/// JWT payload as it travels on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // Subject (identity id)
    pub email: String,
    pub name: String,
    pub exp: i64, // Expiration time
}

/// A freshly minted session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub claims: CredentialClaims,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Mints and checks HS256 session tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Errors
    ///
    /// Returns `ServerError::Config` when `secret` is empty
    pub fn new(secret: &str, clock: Arc<dyn Clock + Send + Sync>) -> Result<Self> {
        if secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        })
    }

    /// Issue a session token for an identity whose credentials the caller
    /// has already checked.
    pub fn issue(&self, identity: &Identity) -> Outcome<SessionToken> {
        let claims = CredentialClaims::from(identity);
        let issued_at = self.clock.utc();
        let expires_at = issued_at + Duration::seconds(SESSION_TOKEN_TTL_SECS);

        let wire = TokenClaims {
            sub: claims.subject_id.to_string(),
            email: claims.email.clone(),
            name: claims.display_name.clone(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &wire, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, subject = %wire.sub, "Token encoding failed");
            FreightError::internal(GENERIC_INTERNAL_MESSAGE)
        })?;

        Ok(SessionToken {
            token,
            claims,
            issued_at,
            expires_at,
        })
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// Expiry is judged against this issuer's clock with no leeway: a token
    /// is dead from the second its `exp` is reached.
    pub fn verify(&self, token: &str) -> Outcome<CredentialClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            FreightError::unauthorized("Invalid or expired token.")
        })?;

        let now = self.clock.utc().timestamp();
        if data.claims.exp <= now {
            tracing::debug!(exp = data.claims.exp, now, "Rejected expired session token");
            return Err(FreightError::unauthorized("Invalid or expired token."));
        }

        let subject_id = data
            .claims
            .sub
            .parse()
            .map_err(|_| FreightError::unauthorized("Invalid or expired token."))?;

        Ok(CredentialClaims {
            subject_id,
            email: data.claims.email,
            display_name: data.claims.name,
        })
    }
}

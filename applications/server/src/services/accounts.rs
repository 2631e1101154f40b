/// Sign-up and sign-in
use crate::services::auth::{CredentialStore, TokenIssuer};
use crate::services::catalogue::ensure_unique;
use crate::services::store_failure;
use chrono::{DateTime, Utc};
use freight_core::{CredentialClaims, FreightError, Identity, IdentitySummary, Outcome};
use freight_storage::{persist_audited, users};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Returned for both unknown emails and wrong passwords
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

const SIGN_UP_FAILED_MESSAGE: &str = "An error occurred during sign-up.";

/// Successful sign-in: the claims and the token that carries them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    pub claims: CredentialClaims,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct AccountService {
    pool: SqlitePool,
    credentials: Arc<CredentialStore>,
    tokens: Arc<TokenIssuer>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl AccountService {
    pub fn new(
        pool: SqlitePool,
        credentials: Arc<CredentialStore>,
        tokens: Arc<TokenIssuer>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            pool,
            credentials,
            tokens,
            clock,
        }
    }

    /// Register a new identity
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Outcome<IdentitySummary> {
        if full_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(FreightError::validation("Invalid sign-up request data."));
        }

        // Guard before hashing
        let mut identity = Identity::new(full_name, email, String::new());
        ensure_unique(&self.pool, &identity).await?;

        identity.password_hash = self
            .credentials
            .hash(password)
            .map_err(|_| FreightError::internal(SIGN_UP_FAILED_MESSAGE))?;

        let identity = persist_audited(&self.pool, self.clock.as_ref(), identity, true)
            .await
            .map_err(|e| store_failure("Insert failed", &e))?;

        tracing::info!(id = identity.id, email = %identity.email, "User signed up");

        Ok(IdentitySummary::from(&identity))
    }

    /// Check credentials and mint a session token
    pub async fn sign_in(&self, email: &str, password: &str) -> Outcome<SignInResult> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(FreightError::validation("Invalid sign-in request data."));
        }

        let Some(identity) = users::find_by_email(&self.pool, email)
            .await
            .map_err(|e| store_failure("Email lookup failed", &e))?
        else {
            tracing::warn!(email, "Sign-in for unknown email");
            return Err(FreightError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        if !self.credentials.verify(password, &identity.password_hash)? {
            tracing::warn!(email, "Sign-in with wrong password");
            return Err(FreightError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let session = self.tokens.issue(&identity)?;

        tracing::info!(id = identity.id, "User signed in");

        Ok(SignInResult {
            claims: session.claims,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    pub async fn list_users(&self) -> Outcome<Vec<IdentitySummary>> {
        let identities = users::get_all(&self.pool)
            .await
            .map_err(|e| store_failure("Listing users failed", &e))?;

        Ok(identities.iter().map(IdentitySummary::from).collect())
    }
}

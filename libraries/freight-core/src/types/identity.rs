/// Identity (user account) domain types
use super::audit::{AuditStamp, Auditable};
use serde::{Deserialize, Serialize};

pub type IdentityId = i64;

/// A user account.
///
/// `id` is 0 until the identity is first persisted. The password hash is
/// never serialized; use [`IdentitySummary`] to expose an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub full_name: String,
    /// Unique, compared case-sensitively as stored
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub audit: AuditStamp,
}

impl Identity {
    /// Create an identity that has not been persisted yet
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            avatar_url: None,
            audit: AuditStamp::unstamped(),
        }
    }
}

impl Auditable for Identity {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Public view of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            full_name: identity.full_name.clone(),
            email: identity.email.clone(),
            avatar_url: identity.avatar_url.clone(),
        }
    }
}

/// Facts about an authenticated identity embedded in a session token.
///
/// Derived fresh from an [`Identity`] at sign-in; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialClaims {
    pub subject_id: IdentityId,
    pub email: String,
    pub display_name: String,
}

impl From<&Identity> for CredentialClaims {
    fn from(identity: &Identity) -> Self {
        Self {
            subject_id: identity.id,
            email: identity.email.clone(),
            display_name: identity.full_name.clone(),
        }
    }
}

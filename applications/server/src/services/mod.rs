/// Server services
pub mod accounts;
pub mod auth;
pub mod catalogue;

pub use accounts::{AccountService, SignInResult};
pub use auth::{CredentialStore, SessionToken, TokenIssuer, SESSION_TOKEN_TTL_SECS};
pub use catalogue::{create_unique_checked, ensure_unique, CarrierInput, CatalogueService};

use crate::error::GENERIC_INTERNAL_MESSAGE;
use freight_core::FreightError;
use freight_storage::StorageError;

/// Log a store failure with context and hide it behind the generic message
pub(crate) fn store_failure(context: &str, err: &StorageError) -> FreightError {
    tracing::error!(error = %err, "{context}");
    FreightError::internal(GENERIC_INTERNAL_MESSAGE)
}

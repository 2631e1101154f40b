//! Worldwide Freight Core
//!
//! Platform-agnostic domain types and error handling for the freight backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Identity`, `Commodity`, `Carrier`
//! - **Audit Capability**: `Auditable` and `AuditStamp`, implemented by every persisted entity
//! - **Outcomes**: the `FreightError` taxonomy and the `Outcome` alias every operation resolves to
//! - **Envelope**: `ApiResponse`, the uniform success/failure wrapper rendered to clients
//!
//! # Example
//!
//! ```rust
//! use freight_core::{Auditable, Commodity, CredentialClaims, Identity};
//!
//! let identity = Identity::new("Ada Lovelace", "ada@example.com", "$2b$12$hash");
//! let claims = CredentialClaims::from(&identity);
//! assert_eq!(claims.display_name, "Ada Lovelace");
//!
//! let commodity = Commodity::new("Steel", "STL");
//! assert_eq!(commodity.audit().created_at, commodity.audit().updated_at);
//! ```

#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use envelope::ApiResponse;
pub use error::{FreightError, Outcome, OutcomeKind};

pub use types::{
    // Audit capability
    AuditStamp, Auditable,
    // Identity
    CredentialClaims, Identity, IdentityId, IdentitySummary,
    // Catalogue
    Carrier, CarrierDetail, CarrierId, Commodity, CommodityId, CommoditySummary,
    EntityKind,
};

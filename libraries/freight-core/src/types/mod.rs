mod audit;
mod carrier;
mod commodity;
mod identity;

pub use audit::{AuditStamp, Auditable};
pub use carrier::{Carrier, CarrierDetail, CarrierId};
pub use commodity::{Commodity, CommodityId, CommoditySummary};
pub use identity::{CredentialClaims, Identity, IdentityId, IdentitySummary};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of persisted business entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Identity,
    Commodity,
    Carrier,
}

impl EntityKind {
    /// Name used in user-facing messages
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Identity => "User",
            EntityKind::Commodity => "Commodity",
            EntityKind::Carrier => "Carrier",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

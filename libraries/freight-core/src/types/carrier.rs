//! Carrier types

use super::audit::{AuditStamp, Auditable};
use super::commodity::{CommodityId, CommoditySummary};
use serde::{Deserialize, Serialize};

pub type CarrierId = i64;

/// A freight carrier, attached to the commodity it transports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub logo_url: String,
    pub commodity_id: CommodityId,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Carrier {
    /// Create a carrier that has not been persisted yet
    pub fn new(
        name: impl Into<String>,
        logo_url: impl Into<String>,
        commodity_id: CommodityId,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            logo_url: logo_url.into(),
            commodity_id,
            audit: AuditStamp::unstamped(),
        }
    }
}

impl Auditable for Carrier {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Carrier joined with its commodity; `commodity` is `None` when the
/// referenced row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierDetail {
    pub carrier: Carrier,
    pub commodity: Option<CommoditySummary>,
}

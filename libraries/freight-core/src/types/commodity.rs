//! Commodity types

use super::audit::{AuditStamp, Auditable};
use serde::{Deserialize, Serialize};

pub type CommodityId = i64;

/// A class of goods carried by carriers. `name` and `code` are each unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    pub id: CommodityId,
    pub name: String,
    pub code: String,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Commodity {
    /// Create a commodity that has not been persisted yet
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            code: code.into(),
            audit: AuditStamp::unstamped(),
        }
    }
}

impl Auditable for Commodity {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Compact commodity view embedded in other responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommoditySummary {
    pub id: CommodityId,
    pub name: String,
    pub code: String,
}

impl From<&Commodity> for CommoditySummary {
    fn from(commodity: &Commodity) -> Self {
        Self {
            id: commodity.id,
            name: commodity.name.clone(),
            code: commodity.code.clone(),
        }
    }
}

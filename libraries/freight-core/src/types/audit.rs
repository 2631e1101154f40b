//! Audit timestamps carried by every persisted entity

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Creation and modification instants of a persisted entity.
///
/// Both fields are owned by the persistence layer: `created_at` is written
/// once at first persistence, `updated_at` on creation and every subsequent
/// modification. Values assigned by callers are overwritten (or, for
/// `created_at` on update, never written).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamp {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp of an entity that has never been persisted
    pub fn unstamped() -> Self {
        Self {
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Stamp restored from storage
    pub fn restored(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }

    /// Reduce an instant to the precision the store keeps (microseconds)
    pub fn storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.trunc_subsecs(6)
    }

    /// Mark as created at `now`
    pub fn mark_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    /// Mark as modified at `now`; `created_at` is left alone
    pub fn mark_modified(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Default for AuditStamp {
    fn default() -> Self {
        Self::unstamped()
    }
}

/// Capability of an entity whose creation/modification instants are
/// maintained by the persistence layer.
///
/// Implementing this is all a new entity type needs to be stamped on save.
pub trait Auditable {
    /// Current stamp
    fn audit(&self) -> &AuditStamp;

    /// Mutable access for the persistence layer
    fn audit_mut(&mut self) -> &mut AuditStamp;
}

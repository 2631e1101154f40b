//! Uniqueness guard
//!
//! A read performed before inserting an entity whose business key must be
//! unique. The guard never writes and holds no lock: two concurrent creators
//! of the same key can both pass it. Nothing in the schema backs it up.

use crate::error::Result;
use crate::records::AuditedRecord;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// An entity whose business key(s) must not collide with existing rows
#[async_trait]
pub trait UniqueCandidate: AuditedRecord + Sized {
    /// First existing entity that shares any unique key with `self`
    async fn find_conflict(&self, pool: &SqlitePool) -> Result<Option<Self>>;
}

/// Look for an existing entity that would collide with `candidate`.
///
/// Returns `Ok(None)` when the caller may go ahead and insert.
pub async fn check_conflict<C>(pool: &SqlitePool, candidate: &C) -> Result<Option<C>>
where
    C: UniqueCandidate,
{
    let existing = candidate.find_conflict(pool).await?;

    if let Some(ref found) = existing {
        tracing::debug!(
            kind = %candidate.kind(),
            existing_id = found.id(),
            "Uniqueness guard hit"
        );
    }

    Ok(existing)
}

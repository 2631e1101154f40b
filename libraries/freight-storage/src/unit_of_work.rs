//! Audit-stamping unit of work
//!
//! All inserts and updates are funnelled through [`UnitOfWork::save`]. Saving
//! captures the clock once, stamps every pending entity in a single pass and
//! only then writes them, inside one transaction:
//!
//! - added entities get `created_at = updated_at = now`
//! - modified entities get `updated_at = now`; their `created_at` is never
//!   written and is re-read from the store after the update, so an in-memory
//!   change to it does not survive the save
//!
//! If any write fails the transaction is rolled back and every tracked entity
//! gets its pre-save id and audit stamp back, so nothing in memory refers to a
//! row that was never committed.

use crate::error::Result;
use crate::records::{persisted_created_at, AuditedRecord};
use chrono::{DateTime, Utc};
use freight_core::AuditStamp;
use mockable::Clock;
use sqlx::SqlitePool;

/// What the unit of work will do with an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Added,
    Modified,
}

struct Entry<'a> {
    state: EntryState,
    entity: &'a mut dyn AuditedRecord,
}

/// Set of entity creations/modifications committed together
#[derive(Default)]
pub struct UnitOfWork<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> UnitOfWork<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new entity to insert
    pub fn add(&mut self, entity: &'a mut dyn AuditedRecord) -> &mut Self {
        self.entries.push(Entry {
            state: EntryState::Added,
            entity,
        });
        self
    }

    /// Track an existing entity to update
    pub fn modify(&mut self, entity: &'a mut dyn AuditedRecord) -> &mut Self {
        self.entries.push(Entry {
            state: EntryState::Modified,
            entity,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stamp and write every tracked entity, returning how many were written.
    ///
    /// # Errors
    ///
    /// Any write failure rolls the whole unit back and restores each tracked
    /// entity's id and audit stamp. Stamping itself cannot fail.
    pub async fn save(mut self, pool: &SqlitePool, clock: &(dyn Clock + Send + Sync)) -> Result<usize> {
        if self.entries.is_empty() {
            return Ok(0);
        }

        let snapshots: Vec<(i64, AuditStamp)> = self
            .entries
            .iter()
            .map(|entry| (entry.entity.id(), *entry.entity.audit()))
            .collect();

        let now = AuditStamp::storage_precision(clock.utc());
        stamp(&mut self.entries, now);

        if let Err(err) = write_all(&mut self.entries, pool).await {
            for (entry, (id, audit)) in self.entries.iter_mut().zip(snapshots) {
                entry.entity.set_id(id);
                *entry.entity.audit_mut() = audit;
            }
            tracing::debug!(entries = self.entries.len(), error = %err, "Unit of work rolled back");
            return Err(err);
        }

        tracing::debug!(entries = self.entries.len(), %now, "Unit of work saved");

        Ok(self.entries.len())
    }
}

// Dropping an uncommitted transaction rolls it back
async fn write_all(entries: &mut [Entry<'_>], pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for entry in entries {
        match entry.state {
            EntryState::Added => entry.entity.insert(&mut tx).await?,
            EntryState::Modified => {
                entry.entity.update(&mut tx).await?;
                let created_at =
                    persisted_created_at(&mut tx, entry.entity.kind(), entry.entity.id()).await?;
                entry.entity.audit_mut().created_at = created_at;
            }
        }
    }

    tx.commit().await?;
    Ok(())
}

fn stamp(entries: &mut [Entry<'_>], now: DateTime<Utc>) {
    for entry in entries {
        let audit = entry.entity.audit_mut();
        match entry.state {
            EntryState::Added => audit.mark_created(now),
            EntryState::Modified => audit.mark_modified(now),
        }
    }
}

/// Persist a single entity through a one-entry unit of work and hand it back
/// as stored.
///
/// # Errors
///
/// Returns `StorageError::NotFound` when updating a row that does not exist,
/// or the underlying database error.
pub async fn persist_audited<E>(
    pool: &SqlitePool,
    clock: &(dyn Clock + Send + Sync),
    mut entity: E,
    is_new: bool,
) -> Result<E>
where
    E: AuditedRecord,
{
    let mut uow = UnitOfWork::new();
    if is_new {
        uow.add(&mut entity);
    } else {
        uow.modify(&mut entity);
    }
    uow.save(pool, clock).await?;

    Ok(entity)
}

//! Row-level plumbing shared by every auditable table

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use freight_core::{AuditStamp, Auditable, EntityKind};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

/// An auditable entity the unit of work knows how to write.
///
/// Implementations never touch the audit stamp themselves; they write
/// whatever the stamper left in it. `update` must not include `created_at`
/// in its write set.
#[async_trait]
pub trait AuditedRecord: Auditable + Send + Sync {
    /// Which table this record lives in
    fn kind(&self) -> EntityKind;

    /// Row id, 0 until first inserted
    fn id(&self) -> i64;

    /// Put back an id captured before a failed save
    fn set_id(&mut self, id: i64);

    /// Insert as a new row and adopt the generated id
    async fn insert(&mut self, conn: &mut SqliteConnection) -> Result<()>;

    /// Overwrite the existing row (everything except `created_at`)
    async fn update(&self, conn: &mut SqliteConnection) -> Result<()>;
}

/// Table backing an entity kind
pub fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Identity => "users",
        EntityKind::Commodity => "commodities",
        EntityKind::Carrier => "carriers",
    }
}

/// Delete a row by id
///
/// # Errors
///
/// Returns `StorageError::NotFound` if no row has that id
pub async fn delete(pool: &SqlitePool, kind: EntityKind, id: i64) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", table_name(kind));
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found(kind.display_name(), id.to_string()));
    }

    Ok(())
}

/// `created_at` as currently persisted for a row
pub(crate) async fn persisted_created_at(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> Result<DateTime<Utc>> {
    let table = table_name(kind);
    let sql = format!("SELECT created_at FROM {table} WHERE id = ?");
    let micros = sqlx::query_scalar::<_, i64>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StorageError::not_found(kind.display_name(), id.to_string()))?;

    from_micros(table, micros)
}

pub(crate) fn to_micros(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

pub(crate) fn from_micros(table: &str, micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StorageError::invalid_row(table, format!("timestamp out of range: {micros}")))
}

/// Read the `created_at`/`updated_at` pair from a row
pub(crate) fn audit_from_row(table: &str, row: &SqliteRow) -> Result<AuditStamp> {
    let created_at = from_micros(table, row.try_get("created_at")?)?;
    let updated_at = from_micros(table, row.try_get("updated_at")?)?;
    Ok(AuditStamp::restored(created_at, updated_at))
}

/// Fail with `NotFound` when an update touched nothing
pub(crate) fn ensure_updated(rows_affected: u64, kind: EntityKind, id: i64) -> Result<()> {
    if rows_affected == 0 {
        return Err(StorageError::not_found(kind.display_name(), id.to_string()));
    }
    Ok(())
}

//! Commodity queries

use crate::error::Result;
use crate::guard::UniqueCandidate;
use crate::records::{audit_from_row, ensure_updated, to_micros, AuditedRecord};
use async_trait::async_trait;
use freight_core::types::{Commodity, CommodityId, EntityKind};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

const TABLE: &str = "commodities";

fn from_row(row: &SqliteRow) -> Result<Commodity> {
    Ok(Commodity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        code: row.try_get("code")?,
        audit: audit_from_row(TABLE, row)?,
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: CommodityId) -> Result<Option<Commodity>> {
    let row = sqlx::query(
        "SELECT id, name, code, created_at, updated_at
         FROM commodities WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// First commodity whose name OR code matches.
///
/// Either key alone is a collision: a fresh name with a taken code is
/// still a conflict.
pub async fn find_conflicting(
    pool: &SqlitePool,
    name: &str,
    code: &str,
) -> Result<Option<Commodity>> {
    let row = sqlx::query(
        "SELECT id, name, code, created_at, updated_at
         FROM commodities
         WHERE code = ? OR name = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(code)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all commodities ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Commodity>> {
    let rows = sqlx::query(
        "SELECT id, name, code, created_at, updated_at
         FROM commodities ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

#[async_trait]
impl AuditedRecord for Commodity {
    fn kind(&self) -> EntityKind {
        EntityKind::Commodity
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    async fn insert(&mut self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO commodities (name, code, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&self.name)
        .bind(&self.code)
        .bind(to_micros(self.audit.created_at))
        .bind(to_micros(self.audit.updated_at))
        .execute(&mut *conn)
        .await?;

        self.id = result.last_insert_rowid();
        Ok(())
    }

    async fn update(&self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "UPDATE commodities SET name = ?, code = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&self.name)
        .bind(&self.code)
        .bind(to_micros(self.audit.updated_at))
        .bind(self.id)
        .execute(&mut *conn)
        .await?;

        ensure_updated(result.rows_affected(), EntityKind::Commodity, self.id)
    }
}

#[async_trait]
impl UniqueCandidate for Commodity {
    async fn find_conflict(&self, pool: &SqlitePool) -> Result<Option<Self>> {
        find_conflicting(pool, &self.name, &self.code).await
    }
}

//! Identity (user account) queries

use crate::error::Result;
use crate::guard::UniqueCandidate;
use crate::records::{audit_from_row, ensure_updated, to_micros, AuditedRecord};
use async_trait::async_trait;
use freight_core::types::{EntityKind, Identity, IdentityId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

const TABLE: &str = "users";

fn from_row(row: &SqliteRow) -> Result<Identity> {
    Ok(Identity {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        avatar_url: row.try_get("avatar_url")?,
        audit: audit_from_row(TABLE, row)?,
    })
}

/// Find the identity registered under `email` (exact, case-sensitive match)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Identity>> {
    let row = sqlx::query(
        "SELECT id, full_name, email, password_hash, avatar_url, created_at, updated_at
         FROM users WHERE email = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn get_by_id(pool: &SqlitePool, id: IdentityId) -> Result<Option<Identity>> {
    let row = sqlx::query(
        "SELECT id, full_name, email, password_hash, avatar_url, created_at, updated_at
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all identities, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Identity>> {
    let rows = sqlx::query(
        "SELECT id, full_name, email, password_hash, avatar_url, created_at, updated_at
         FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

#[async_trait]
impl AuditedRecord for Identity {
    fn kind(&self) -> EntityKind {
        EntityKind::Identity
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    async fn insert(&mut self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO users (full_name, email, password_hash, avatar_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.full_name)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(&self.avatar_url)
        .bind(to_micros(self.audit.created_at))
        .bind(to_micros(self.audit.updated_at))
        .execute(&mut *conn)
        .await?;

        self.id = result.last_insert_rowid();
        Ok(())
    }

    // password_hash is write-once: there is no reset flow
    async fn update(&self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users
             SET full_name = ?, email = ?, avatar_url = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&self.full_name)
        .bind(&self.email)
        .bind(&self.avatar_url)
        .bind(to_micros(self.audit.updated_at))
        .bind(self.id)
        .execute(&mut *conn)
        .await?;

        ensure_updated(result.rows_affected(), EntityKind::Identity, self.id)
    }
}

#[async_trait]
impl UniqueCandidate for Identity {
    async fn find_conflict(&self, pool: &SqlitePool) -> Result<Option<Self>> {
        find_by_email(pool, &self.email).await
    }
}

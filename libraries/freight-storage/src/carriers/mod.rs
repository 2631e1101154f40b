//! Carrier queries

use crate::error::Result;
use crate::records::{audit_from_row, ensure_updated, to_micros, AuditedRecord};
use async_trait::async_trait;
use freight_core::types::{Carrier, CarrierDetail, CarrierId, CommoditySummary, EntityKind};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

const TABLE: &str = "carriers";

const DETAIL_SELECT: &str =
    "SELECT c.id, c.name, c.logo_url, c.commodity_id, c.created_at, c.updated_at,
            m.id AS commodity_ref_id, m.name AS commodity_name, m.code AS commodity_code
     FROM carriers c
     LEFT JOIN commodities m ON m.id = c.commodity_id";

fn from_row(row: &SqliteRow) -> Result<Carrier> {
    Ok(Carrier {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        logo_url: row.try_get("logo_url")?,
        commodity_id: row.try_get("commodity_id")?,
        audit: audit_from_row(TABLE, row)?,
    })
}

fn detail_from_row(row: &SqliteRow) -> Result<CarrierDetail> {
    let carrier = from_row(row)?;

    let commodity = match row.try_get::<Option<i64>, _>("commodity_ref_id")? {
        Some(id) => Some(CommoditySummary {
            id,
            name: row.try_get("commodity_name")?,
            code: row.try_get("commodity_code")?,
        }),
        None => None,
    };

    Ok(CarrierDetail { carrier, commodity })
}

pub async fn get_by_id(pool: &SqlitePool, id: CarrierId) -> Result<Option<Carrier>> {
    let row = sqlx::query(
        "SELECT id, name, logo_url, commodity_id, created_at, updated_at
         FROM carriers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Carrier with its commodity embedded
pub async fn get_by_id_with_commodity(
    pool: &SqlitePool,
    id: CarrierId,
) -> Result<Option<CarrierDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE c.id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(detail_from_row).transpose()
}

/// All carriers with their commodities embedded, oldest first
pub async fn get_all_with_commodity(pool: &SqlitePool) -> Result<Vec<CarrierDetail>> {
    let sql = format!("{DETAIL_SELECT} ORDER BY c.id");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(detail_from_row).collect()
}

#[async_trait]
impl AuditedRecord for Carrier {
    fn kind(&self) -> EntityKind {
        EntityKind::Carrier
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    async fn insert(&mut self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO carriers (name, logo_url, commodity_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&self.name)
        .bind(&self.logo_url)
        .bind(self.commodity_id)
        .bind(to_micros(self.audit.created_at))
        .bind(to_micros(self.audit.updated_at))
        .execute(&mut *conn)
        .await?;

        self.id = result.last_insert_rowid();
        Ok(())
    }

    async fn update(&self, conn: &mut SqliteConnection) -> Result<()> {
        let result = sqlx::query(
            "UPDATE carriers
             SET name = ?, logo_url = ?, commodity_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&self.name)
        .bind(&self.logo_url)
        .bind(self.commodity_id)
        .bind(to_micros(self.audit.updated_at))
        .bind(self.id)
        .execute(&mut *conn)
        .await?;

        ensure_updated(result.rows_affected(), EntityKind::Carrier, self.id)
    }
}

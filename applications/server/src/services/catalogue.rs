/// Commodity and carrier operations
use crate::services::store_failure;
use freight_core::{
    Carrier, CarrierDetail, CarrierId, Commodity, CommodityId, EntityKind, FreightError, Outcome,
};
use freight_storage::{carriers, check_conflict, commodities, persist_audited, UniqueCandidate};
use mockable::Clock;
use sqlx::SqlitePool;
use std::sync::Arc;

/// User-facing message for a uniqueness guard hit
pub fn conflict_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Identity => "A user with this email already exists.",
        EntityKind::Commodity => "A commodity with the same name or code already exists.",
        EntityKind::Carrier => "A carrier with the same details already exists.",
    }
}

/// Run the uniqueness guard for `candidate`, failing with `Conflict` when an
/// existing entity shares one of its keys. Never writes.
pub async fn ensure_unique<C>(pool: &SqlitePool, candidate: &C) -> Outcome<()>
where
    C: UniqueCandidate,
{
    let existing = check_conflict(pool, candidate)
        .await
        .map_err(|e| store_failure("Uniqueness check failed", &e))?;

    match existing {
        Some(_) => Err(FreightError::conflict(conflict_message(candidate.kind()))),
        None => Ok(()),
    }
}

/// Run the uniqueness guard for `candidate` and, if nothing collides, insert
/// it through the audit stamper.
///
/// The check and the insert are separate statements; a concurrent creator of
/// the same key can slip in between them.
pub async fn create_unique_checked<C>(
    pool: &SqlitePool,
    clock: &(dyn Clock + Send + Sync),
    candidate: C,
) -> Outcome<C>
where
    C: UniqueCandidate,
{
    ensure_unique(pool, &candidate).await?;

    persist_audited(pool, clock, candidate, true)
        .await
        .map_err(|e| store_failure("Insert failed", &e))
}

/// Fields a caller supplies to create or replace a carrier
#[derive(Debug, Clone, Default)]
pub struct CarrierInput {
    pub name: String,
    pub logo_url: String,
    pub commodity_id: CommodityId,
}

impl CarrierInput {
    fn validate(&self) -> Outcome<()> {
        if self.name.trim().is_empty() || self.logo_url.trim().is_empty() || self.commodity_id <= 0 {
            return Err(FreightError::validation("Invalid carrier data."));
        }
        Ok(())
    }
}

pub struct CatalogueService {
    pool: SqlitePool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl CatalogueService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    /// Guarded insert of any uniqueness-constrained entity
    pub async fn create_unique_checked<C>(&self, candidate: C) -> Outcome<C>
    where
        C: UniqueCandidate,
    {
        create_unique_checked(&self.pool, self.clock.as_ref(), candidate).await
    }

    pub async fn create_commodity(&self, name: &str, code: &str) -> Outcome<Commodity> {
        if name.trim().is_empty() || code.trim().is_empty() {
            return Err(FreightError::validation("Invalid commodity data."));
        }

        let commodity = self.create_unique_checked(Commodity::new(name, code)).await?;
        tracing::info!(id = commodity.id, code = %commodity.code, "Commodity created");

        Ok(commodity)
    }

    pub async fn create_carrier(&self, input: CarrierInput) -> Outcome<Carrier> {
        input.validate()?;
        self.require_commodity(input.commodity_id).await?;

        let carrier = Carrier::new(input.name, input.logo_url, input.commodity_id);
        let carrier = persist_audited(&self.pool, self.clock.as_ref(), carrier, true)
            .await
            .map_err(|e| store_failure("Insert failed", &e))?;

        tracing::info!(id = carrier.id, "Carrier created");
        Ok(carrier)
    }

    pub async fn list_carriers(&self) -> Outcome<Vec<CarrierDetail>> {
        carriers::get_all_with_commodity(&self.pool)
            .await
            .map_err(|e| store_failure("Listing carriers failed", &e))
    }

    pub async fn get_carrier(&self, id: CarrierId) -> Outcome<CarrierDetail> {
        carriers::get_by_id_with_commodity(&self.pool, id)
            .await
            .map_err(|e| store_failure("Loading carrier failed", &e))?
            .ok_or_else(|| FreightError::not_found("Carrier not found."))
    }

    /// Replace a carrier's fields; its `created_at` is left as stored
    pub async fn update_carrier(&self, id: CarrierId, input: CarrierInput) -> Outcome<Carrier> {
        input.validate()?;

        let mut carrier = carriers::get_by_id(&self.pool, id)
            .await
            .map_err(|e| store_failure("Loading carrier failed", &e))?
            .ok_or_else(|| FreightError::not_found("Carrier not found."))?;

        if carrier.commodity_id != input.commodity_id {
            self.require_commodity(input.commodity_id).await?;
        }

        carrier.name = input.name;
        carrier.logo_url = input.logo_url;
        carrier.commodity_id = input.commodity_id;

        persist_audited(&self.pool, self.clock.as_ref(), carrier, false)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    FreightError::not_found("Carrier not found.")
                } else {
                    store_failure("Update failed", &e)
                }
            })
    }

    async fn require_commodity(&self, id: CommodityId) -> Outcome<()> {
        commodities::get_by_id(&self.pool, id)
            .await
            .map_err(|e| store_failure("Loading commodity failed", &e))?
            .map(|_| ())
            .ok_or_else(|| FreightError::not_found("Commodity not found."))
    }
}

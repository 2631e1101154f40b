/// Carrier API routes
use crate::{
    api::parse_body, error::Result, middleware::AuthenticatedUser, services::CarrierInput,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use freight_core::{ApiResponse, Carrier, CarrierDetail, CarrierId, CommodityId, CommoditySummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarrierRequest {
    pub name: String,
    pub logo_url: String,
    pub commodity_id: CommodityId,
}

impl From<CarrierRequest> for CarrierInput {
    fn from(req: CarrierRequest) -> Self {
        Self {
            name: req.name,
            logo_url: req.logo_url,
            commodity_id: req.commodity_id,
        }
    }
}

/// Carrier as written by create and update
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierSummary {
    pub id: CarrierId,
    pub name: String,
    pub logo_url: String,
    pub commodity_id: CommodityId,
}

impl From<&Carrier> for CarrierSummary {
    fn from(carrier: &Carrier) -> Self {
        Self {
            id: carrier.id,
            name: carrier.name.clone(),
            logo_url: carrier.logo_url.clone(),
            commodity_id: carrier.commodity_id,
        }
    }
}

/// Carrier as listed, with its commodity embedded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierView {
    pub id: CarrierId,
    pub name: String,
    pub logo_url: String,
    pub commodity: Option<CommoditySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CarrierDetail> for CarrierView {
    fn from(detail: CarrierDetail) -> Self {
        Self {
            id: detail.carrier.id,
            name: detail.carrier.name,
            logo_url: detail.carrier.logo_url,
            commodity: detail.commodity,
            created_at: detail.carrier.audit.created_at,
            updated_at: detail.carrier.audit.updated_at,
        }
    }
}

/// POST /api/carrier
pub async fn create_carrier(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    payload: std::result::Result<Json<CarrierRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CarrierSummary>>> {
    let req = parse_body(payload, "Invalid carrier data.")?;

    let carrier = app_state.catalogue.create_carrier(req.into()).await?;

    Ok(Json(ApiResponse::ok(
        "Carrier created successfully.",
        CarrierSummary::from(&carrier),
    )))
}

/// GET /api/carrier
pub async fn list_carriers(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<CarrierView>>>> {
    let carriers = app_state.catalogue.list_carriers().await?;

    Ok(Json(ApiResponse::ok(
        "Carriers retrieved successfully.",
        carriers.into_iter().map(CarrierView::from).collect(),
    )))
}

/// GET /api/carrier/:id
pub async fn get_carrier(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<CarrierId>,
) -> Result<Json<ApiResponse<CarrierView>>> {
    let carrier = app_state.catalogue.get_carrier(id).await?;

    Ok(Json(ApiResponse::ok(
        "Carrier retrieved successfully.",
        CarrierView::from(carrier),
    )))
}

/// PUT /api/carrier/:id
pub async fn update_carrier(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<CarrierId>,
    payload: std::result::Result<Json<CarrierRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CarrierSummary>>> {
    let req = parse_body(payload, "Invalid carrier data.")?;

    let carrier = app_state.catalogue.update_carrier(id, req.into()).await?;

    Ok(Json(ApiResponse::ok(
        "Carrier updated successfully.",
        CarrierSummary::from(&carrier),
    )))
}

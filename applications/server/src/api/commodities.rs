/// Commodity API routes
use crate::{api::parse_body, error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use freight_core::{ApiResponse, CommoditySummary};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommodityRequest {
    pub name: String,
    pub code: String,
}

/// POST /api/commodity
pub async fn create_commodity(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    payload: std::result::Result<Json<CreateCommodityRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CommoditySummary>>> {
    let req = parse_body(payload, "Invalid commodity data.")?;

    let commodity = app_state
        .catalogue
        .create_commodity(&req.name, &req.code)
        .await?;

    tracing::debug!(by = user.subject_id, id = commodity.id, "Commodity created via API");

    Ok(Json(ApiResponse::ok(
        "Commodity created successfully.",
        CommoditySummary::from(&commodity),
    )))
}

/// Account API routes
use crate::{api::parse_body, error::Result, services::SignInResult, state::AppState};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use freight_core::{ApiResponse, IdentitySummary};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/user/signUp
pub async fn sign_up(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<IdentitySummary>>> {
    let req = parse_body(payload, "Invalid sign-up request data.")?;

    let user = app_state
        .accounts
        .sign_up(&req.full_name, &req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok("User signed up successfully.", user)))
}

/// POST /api/user/signIn
pub async fn sign_in(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SignInResult>>> {
    let req = parse_body(payload, "Invalid sign-in request data.")?;

    let session = app_state.accounts.sign_in(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok("User signed in successfully.", session)))
}

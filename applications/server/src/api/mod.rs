/// API route modules
pub mod carriers;
pub mod commodities;
pub mod health;
pub mod users;

use crate::{
    error::{Result, ServerError},
    middleware,
    state::AppState,
};
use axum::{
    extract::rejection::JsonRejection,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full `/api` router over the given state
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/user/signUp", post(users::sign_up))
        .route("/user/signIn", post(users::sign_in));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/commodity", post(commodities::create_commodity))
        .route(
            "/carrier",
            post(carriers::create_carrier).get(carriers::list_carriers),
        )
        .route(
            "/carrier/:id",
            get(carriers::get_carrier).put(carriers::update_carrier),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.tokens),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Unwrap a JSON body, turning a malformed or missing one into a validation
/// failure carrying `message`
pub(crate) fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>, message: &str) -> Result<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(ServerError::validation(message))
        }
    }
}

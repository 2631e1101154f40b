/// Authentication middleware
use crate::{error::ServerError, services::TokenIssuer};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use freight_core::IdentityId;
use std::sync::Arc;

const MISSING_TOKEN_MESSAGE: &str = "Authorization token is missing or malformed.";

/// Caller identity taken from a verified session token.
/// Can be used as an extractor in handlers behind [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject_id: IdentityId,
    pub email: String,
}

/// Middleware that extracts and validates the JWT from the Authorization header
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::unauthorized(MISSING_TOKEN_MESSAGE))?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::from(e)
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        subject_id: claims.subject_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::unauthorized("Not authenticated."))
    }
}

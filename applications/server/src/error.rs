/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use freight_core::{ApiResponse, FreightError, OutcomeKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message shown to clients for any failure whose details stay in the logs
pub const GENERIC_INTERNAL_MESSAGE: &str = "An error occurred while processing your request.";

#[derive(Debug, Error)]
pub enum ServerError {
    /// A classified business outcome, rendered as-is in the envelope
    #[error(transparent)]
    Outcome(#[from] FreightError),

    #[error("Storage error: {0}")]
    Storage(#[from] freight_storage::StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Outcome(FreightError::validation(message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Outcome(FreightError::unauthorized(message))
    }
}

/// HTTP status for each outcome kind
pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Success => StatusCode::OK,
        OutcomeKind::ValidationFailure => StatusCode::BAD_REQUEST,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Unauthorized => StatusCode::UNAUTHORIZED,
        OutcomeKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Outcome(ref err) => (status_for(err.kind()), ApiResponse::<()>::from(err)),
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(GENERIC_INTERNAL_MESSAGE),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(GENERIC_INTERNAL_MESSAGE),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(GENERIC_INTERNAL_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

//! Uniform response envelope
//!
//! Every response leaving the backend, successful or not, is wrapped in
//! `{ "success": bool, "message": string, "data"?: T }`.

use crate::error::FreightError;
use serde::{Deserialize, Serialize};

/// Success/failure wrapper with an optional payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed response without payload
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> From<&FreightError> for ApiResponse<T> {
    fn from(err: &FreightError) -> Self {
        Self::failure(err.message())
    }
}

//! Error types for the GovConnect API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::relay::RelayError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Letter error: {0}")]
    Letter(#[from] govconnect_letter::LetterError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Backend(e) => {
                tracing::error!("Backend error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream service unavailable".to_string(),
                )
            }
            ApiError::Relay(e) => {
                tracing::error!("Relay error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Complaint submission failed".to_string(),
                )
            }
            ApiError::Letter(e) => {
                tracing::error!("Letter error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not render complaint letter".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

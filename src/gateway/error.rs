use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::INVALID_API_KEY_MESSAGE;
use crate::inference::InferenceError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid API Key")]
    Unauthorized,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            GatewayError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, INVALID_API_KEY_MESSAGE.to_string())
            }
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            // Upstream detail is logged by the handler, not echoed to callers.
            GatewayError::Inference(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream inference request failed".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

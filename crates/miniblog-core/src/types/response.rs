//! Response types shared by the transports.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error reason.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Whether the client may retry the same request.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.kind.reason().to_string(),
            message: err.public_message().to_string(),
            retryable: err.kind.is_retryable(),
        }
    }
}

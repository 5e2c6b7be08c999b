//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use miniblog_core::error::{AppError, ErrorKind};
use miniblog_core::types::ApiErrorResponse;

/// HTTP face of an [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NoCredential
        | ErrorKind::TokenMalformed
        | ErrorKind::TokenSignatureInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorKind::UserNotFound | ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn www_authenticate(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::NoCredential => Some("Bearer"),
        ErrorKind::TokenMalformed => Some("Bearer error=\"invalid_request\""),
        ErrorKind::TokenSignatureInvalid | ErrorKind::TokenExpired => {
            Some("Bearer error=\"invalid_token\"")
        }
        _ => None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind.is_internal() {
            tracing::error!(error = %err, "Internal server error");
        }

        let status = status_for(err.kind);
        let body = ApiErrorResponse::from(&err);
        let mut response = (status, Json(body)).into_response();

        if let Some(challenge) = www_authenticate(err.kind) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }
        response
    }
}

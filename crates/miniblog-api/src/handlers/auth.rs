//! Auth handlers: login and token refresh.

use axum::Json;
use axum::extract::State;
use tracing::info;
use validator::Validate;

use miniblog_core::config::AuthMode;
use miniblog_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /login
///
/// Unknown usernames and wrong passwords produce the same error.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state.users.find_by_username(&req.username).await?;

    let verified = state.password_hasher.verify_credentials(
        &req.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    )?;

    let user = match user {
        Some(user) if verified => user,
        _ => return Err(AppError::invalid_credentials("Invalid username or password").into()),
    };

    let issued = state.codec.issue_default(&user.user_id)?;
    info!(user_id = %user.user_id, "User logged in");

    Ok(Json(ApiResponse::ok(issued.into())))
}

/// PUT /refresh-token
///
/// Unavailable in bypass mode, where the caller identity is unverified.
pub async fn refresh_token(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    if state.config.auth.mode == AuthMode::Bypass {
        return Err(AppError::validation("Token refresh is unavailable in bypass mode").into());
    }

    let issued = state.codec.refresh(current.user_id())?;
    Ok(Json(ApiResponse::ok(issued.into())))
}

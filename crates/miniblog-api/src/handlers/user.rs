//! User handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use miniblog_auth::UserRetriever;
use miniblog_core::error::AppError;
use miniblog_core::types::{ResourceId, ResourceType};
use miniblog_entity::CreateUser;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::{ApiResponse, IdentityResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .users
        .create(CreateUser {
            username: req.username,
            password_hash,
            nickname: req.nickname,
            email: req.email,
            phone: req.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id = ResourceId::parse_as(&user_id, ResourceType::User)?;

    let user = state
        .users
        .get_user(id.as_str())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /v1/users/me
///
/// Echoes the identity the authentication layer attached to the request.
pub async fn whoami(current: CurrentUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(current.0.into()))
}

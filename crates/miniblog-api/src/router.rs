//! Route definitions for the Miniblog HTTP API.
//!
//! Public routes (health, login, registration) are mounted without
//! authentication. Everything else sits behind a route layer chosen once
//! from `auth.mode`: bearer-token verification, or the trusted-header
//! bypass.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use miniblog_core::config::AuthMode;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health, login, and registration (no auth required)
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/login", post(handlers::auth::login))
        .route("/v1/users", post(handlers::user::create_user))
}

/// Routes that require an identity
fn protected_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/refresh-token", put(handlers::auth::refresh_token))
        .route("/v1/users/me", get(handlers::user::whoami))
        .route("/v1/users/{user_id}", get(handlers::user::get_user));

    match state.config.auth.mode {
        AuthMode::Jwt => routes.route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authn::authenticate,
        )),
        AuthMode::Bypass => {
            routes.route_layer(axum_middleware::from_fn(middleware::bypass::simulate_authn))
        }
    }
}

//! # miniblog-api
//!
//! HTTP transport for Miniblog built on Axum.
//!
//! Serves both the plain HTTP router and the HTTP face of the RPC gateway.
//! Authentication runs as route middleware that injects an
//! [`Identity`](miniblog_auth::Identity) into request extensions before
//! any handler sees the request.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

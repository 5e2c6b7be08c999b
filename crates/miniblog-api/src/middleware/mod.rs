//! Axum middleware stack.

pub mod authn;
pub mod bypass;
pub mod cors;
pub mod logging;

pub use authn::{HttpCredentials, authenticate};
pub use bypass::simulate_authn;

//! # miniblog-entity
//!
//! Domain entity models consumed by the authentication core and owned by
//! the storage layer.

pub mod user;

pub use user::{CreateUser, User};

//! # miniblog-store
//!
//! User storage for Miniblog. The relational store is an external
//! collaborator; this crate provides the in-memory implementation the
//! server and tests run against.

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::{UserStore, normalize_username};

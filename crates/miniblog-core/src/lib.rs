//! # miniblog-core
//!
//! Core crate for Miniblog. Contains configuration schemas, typed
//! resource identifiers, the clock abstraction used for token expiry,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Miniblog crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AppError, ErrorKind};
pub use result::AppResult;

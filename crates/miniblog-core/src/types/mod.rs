//! Core type definitions used across the Miniblog workspace.

pub mod id;
pub mod response;

pub use id::{IdGenerator, ResourceId, ResourceType};
pub use response::ApiErrorResponse;

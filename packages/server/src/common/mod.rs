// Common types and utilities shared across the application

pub mod auth;
pub mod errors;

pub use auth::{AuthError, Permission};
pub use errors::{ApiError, ErrorResponse};

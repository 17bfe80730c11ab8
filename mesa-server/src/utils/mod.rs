//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_message, ok_with_message};

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

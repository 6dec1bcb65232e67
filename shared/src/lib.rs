//! Shared types for DocVault
//!
//! Common types used by both the server and the client crates: error codes,
//! the JSON response envelope, wire models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

//! Unified error system for DocVault
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`] / [`ApiErrorBody`]: The `{ success, ... }` JSON envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Document errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiErrorBody};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::DocumentNotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Missing title");
//!
//! // Create an error with details
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "email");
//!
//! // Convert to the JSON error body
//! let body = ApiErrorBody::from(&err);
//! assert!(!body.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiErrorBody, ApiResponse, AppError, AppResult};

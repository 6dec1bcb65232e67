//! Data models
//!
//! Wire types shared between docvault-server and docvault-client.
//! JSON field names are camelCase; IDs travel as decimal strings and
//! timestamps as RFC 3339.

pub mod activity;
pub mod document;
pub mod employee;
pub mod stats;
pub mod user;

// Re-exports
pub use activity::*;
pub use document::*;
pub use employee::*;
pub use stats::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Payload for responses that only carry `{ "success": true }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

/// `{ "message": ... }` payload (ping, password reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

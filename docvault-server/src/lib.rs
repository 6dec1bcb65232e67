//! docvault-server — document vault REST service
//!
//! Employees upload documents (payload as base64 JSON); administrators manage
//! employee accounts and review or delete any document. Backed by SQLite.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod payload;
pub mod services;
pub mod state;
pub mod util;

pub use api::create_router;
pub use config::Config;
pub use error::{BoxError, ServiceError, ServiceResult};
pub use state::AppState;

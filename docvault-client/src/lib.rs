//! DocVault client
//!
//! Typed access to the DocVault HTTP API plus the dashboard view-models
//! that sit on top of it.
//!
//! - [`NetworkHttpClient`] for a server reached over HTTP
//! - [`OneshotHttpClient`] for a `Router` in the same process

pub mod api;
pub mod client;
pub mod error;
pub mod session;
pub mod views;

pub use api::{DocVaultClient, Viewer};
pub use client::{FileBody, HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore};

// Re-export shared types for convenience
pub use shared;

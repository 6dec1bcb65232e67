//! Authentication: signed session tokens and the request-level access gate

pub mod gate;
pub mod token;

pub use gate::{Caller, CallerSource, Visibility};
pub use token::{AUTH_COOKIE, Claims, create_token, verify_token};

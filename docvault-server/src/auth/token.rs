//! Session tokens (HS256 JWT)

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::Role;

/// Token lifetime, matches the `authToken` cookie max-age
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "authToken";

/// JWT claims for a signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        shared::util::parse_id(&self.sub)
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: i64,
    email: &str,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })
}

/// `Set-Cookie` value carrying a fresh token
pub fn session_cookie(token: &str) -> String {
    format!(
        "{AUTH_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        TOKEN_TTL_DAYS * 24 * 60 * 60
    )
}

/// `Set-Cookie` value that clears the session
pub fn clear_cookie() -> String {
    format!("{AUTH_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

/// Pull the token from the `authToken` cookie or an `Authorization: Bearer` header.
/// The cookie wins when both are present.
pub fn token_from_headers(headers: &http::HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

//! Access-control gate
//!
//! Resolves who is calling: a valid session token wins. Without a token,
//! and only when `allow_role_query` is enabled, the legacy `role` / `userId`
//! query parameters are trusted. A token that is present but invalid is
//! rejected instead of falling back to the query.

use axum::extract::{FromRequestParts, Query};
use http::request::Parts;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::token::{Claims, token_from_headers, verify_token};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct CallerQuery {
    role: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Where the caller's identity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerSource {
    Token,
    Query,
    Anonymous,
}

/// Effective caller of a request
#[derive(Debug, Clone)]
pub struct Caller {
    pub role: Option<Role>,
    pub user_id: Option<i64>,
    pub source: CallerSource,
}

/// Which documents a caller may list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    OwnedBy(i64),
    /// An employee without a resolvable user id sees nothing
    Nothing,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self {
            role: None,
            user_id: None,
            source: CallerSource::Anonymous,
        }
    }

    fn from_claims(claims: &Claims) -> Self {
        Self {
            role: Some(claims.role),
            user_id: claims.user_id(),
            source: CallerSource::Token,
        }
    }

    fn from_query(query: CallerQuery) -> Self {
        Self {
            role: query.role.as_deref().and_then(|r| r.parse().ok()),
            user_id: query.user_id.as_deref().and_then(shared::util::parse_id),
            source: CallerSource::Query,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(|r| r.is_admin())
    }

    /// Fail with 403 unless the caller is an admin
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::with_message(ErrorCode::PermissionDenied, "Unauthorized"))
        }
    }

    /// Employees only see their own uploads; everyone else sees all
    pub fn visibility(&self) -> Visibility {
        match (self.role, self.user_id) {
            (Some(Role::Employee), Some(id)) => Visibility::OwnedBy(id),
            (Some(Role::Employee), None) => Visibility::Nothing,
            _ => Visibility::All,
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(caller.clone());
        }

        let caller = match token_from_headers(&parts.headers) {
            Some(token) => {
                let claims = verify_token(&token, state.jwt_secret()).inspect_err(|_| {
                    tracing::warn!(uri = %parts.uri, "Rejected request with invalid token");
                })?;
                Caller::from_claims(&claims)
            }
            None if state.config.allow_role_query => {
                let Query(query) = Query::<CallerQuery>::try_from_uri(&parts.uri)
                    .unwrap_or_else(|_| Query(CallerQuery::default()));
                Caller::from_query(query)
            }
            None => Caller::anonymous(),
        };

        parts.extensions.insert(caller.clone());
        Ok(caller)
    }
}

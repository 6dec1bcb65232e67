//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::DocumentNotFound
            | Self::EmployeeNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::CannotModifyAdmin
            | Self::CannotDeleteAdmin => StatusCode::FORBIDDEN,

            // 413 Payload Too Large
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, duplicate email, weak/incorrect password, payload errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

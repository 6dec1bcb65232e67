//! Unified error codes for DocVault
//!
//! This module defines all error codes used across the server and the client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Document errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the client can map them
/// back without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled (blocked employee)
    AccountDisabled = 1007,
    /// Current password does not match
    IncorrectPassword = 1008,
    /// Password shorter than the minimum length
    WeakPassword = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Cannot deactivate an admin account
    CannotModifyAdmin = 2004,
    /// Cannot delete an admin account
    CannotDeleteAdmin = 2005,

    // ==================== 6xxx: Document ====================
    /// Document not found
    DocumentNotFound = 6001,
    /// File too large
    FileTooLarge = 6501,
    /// No documents provided in request
    NoFileProvided = 6504,
    /// Document has no stored payload
    NoFileData = 6510,
    /// Stored or submitted payload is not valid base64
    InvalidFileData = 6511,
    /// Every entry of a batch upload failed
    BatchUploadFailed = 6520,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Email already registered
    EmailAlreadyExists = 8002,
    /// User account not found
    UserNotFound = 8006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            // Auth
            ErrorCode::NotAuthenticated => "No token",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountDisabled => "Account is blocked",
            ErrorCode::IncorrectPassword => "Current password is incorrect",
            ErrorCode::WeakPassword => "Password must be at least 6 characters",

            // Permission
            ErrorCode::PermissionDenied => "Unauthorized",
            ErrorCode::CannotModifyAdmin => "Cannot block the administrator account",
            ErrorCode::CannotDeleteAdmin => "Cannot delete the administrator account",

            // Document
            ErrorCode::DocumentNotFound => "Document not found",
            ErrorCode::FileTooLarge => "File too large. Maximum size is 500 MB",
            ErrorCode::NoFileProvided => "No documents provided",
            ErrorCode::NoFileData => "File data not available",
            ErrorCode::InvalidFileData => "Invalid file data",
            ErrorCode::BatchUploadFailed => "Failed to upload documents",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmailAlreadyExists => "Employee already exists",
            ErrorCode::UserNotFound => "User not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::IncorrectPassword),
            1009 => Ok(ErrorCode::WeakPassword),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2004 => Ok(ErrorCode::CannotModifyAdmin),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Document
            6001 => Ok(ErrorCode::DocumentNotFound),
            6501 => Ok(ErrorCode::FileTooLarge),
            6504 => Ok(ErrorCode::NoFileProvided),
            6510 => Ok(ErrorCode::NoFileData),
            6511 => Ok(ErrorCode::InvalidFileData),
            6520 => Ok(ErrorCode::BatchUploadFailed),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmailAlreadyExists),
            8006 => Ok(ErrorCode::UserNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::AccountDisabled,
        ErrorCode::IncorrectPassword,
        ErrorCode::WeakPassword,
        ErrorCode::PermissionDenied,
        ErrorCode::CannotModifyAdmin,
        ErrorCode::CannotDeleteAdmin,
        ErrorCode::DocumentNotFound,
        ErrorCode::FileTooLarge,
        ErrorCode::NoFileProvided,
        ErrorCode::NoFileData,
        ErrorCode::InvalidFileData,
        ErrorCode::BatchUploadFailed,
        ErrorCode::EmployeeNotFound,
        ErrorCode::EmailAlreadyExists,
        ErrorCode::UserNotFound,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::DocumentNotFound.code(), 6001);
        assert_eq!(ErrorCode::NoFileData.code(), 6510);
        assert_eq!(ErrorCode::EmailAlreadyExists.code(), 8002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::FileTooLarge).unwrap();
        assert_eq!(json, "6501");
        let code: ErrorCode = serde_json::from_str("1008").unwrap();
        assert_eq!(code, ErrorCode::IncorrectPassword);
        assert!(serde_json::from_str::<ErrorCode>("31337").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_messages_not_empty() {
        for code in ALL {
            assert!(!code.message().is_empty(), "{code:?} has no message");
        }
    }
}

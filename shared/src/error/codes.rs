//! Unified error codes for the storefront catalog
//!
//! This module defines all error codes returned by catalog-server and
//! understood by its clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Request payload failed validation
    ValidationFailed = 2,

    // ==================== 6xxx: Catalog ====================
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has child categories
    CategoryHasChildren = 6102,
    /// Category slug already in use
    CategorySlugExists = 6103,
    /// Re-parenting would create a cycle
    CategoryCycle = 6104,
    /// Slug is empty or contains characters outside [a-z0-9-]
    CategoryInvalidSlug = 6105,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Catalog
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasChildren => "Category still has child categories",
            ErrorCode::CategorySlugExists => "Category slug already exists",
            ErrorCode::CategoryCycle => "A category cannot be moved under itself or its descendants",
            ErrorCode::CategoryInvalidSlug => {
                "Slug must contain only lowercase letters, numbers, and hyphens"
            }

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
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
            2 => Ok(ErrorCode::ValidationFailed),

            // Catalog
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasChildren),
            6103 => Ok(ErrorCode::CategorySlugExists),
            6104 => Ok(ErrorCode::CategoryCycle),
            6105 => Ok(ErrorCode::CategoryInvalidSlug),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);

        assert_eq!(ErrorCode::CategoryNotFound.code(), 6101);
        assert_eq!(ErrorCode::CategoryHasChildren.code(), 6102);
        assert_eq!(ErrorCode::CategorySlugExists.code(), 6103);
        assert_eq!(ErrorCode::CategoryCycle.code(), 6104);
        assert_eq!(ErrorCode::CategoryInvalidSlug.code(), 6105);

        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryCycle,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(u16::MAX), Err(InvalidErrorCode(u16::MAX)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::CategorySlugExists).unwrap();
        assert_eq!(json, "6103");

        let code: ErrorCode = serde_json::from_str("6101").unwrap();
        assert_eq!(code, ErrorCode::CategoryNotFound);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::CategoryCycle.to_string(), "6104");
    }
}
